use std::path::PathBuf;

use thiserror::Error;

use crate::state::RunState;

/// Errors that abort a run.
///
/// Per-file problems (unreadable files, malformed source, subtree walk
/// errors) are not represented here; they are collected as
/// [`Failure`](crate::diagnostics::Failure)s and the run carries on.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("path '{path}' does not exist")]
    RootNotFound { path: PathBuf },

    #[error("cannot read '{path}': {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no .{extension} files found in '{path}'")]
    NoFilesFound { path: PathBuf, extension: &'static str },

    #[error("worker panicked while processing '{path}': {message}")]
    WorkerPanicked { path: PathBuf, message: String },

    #[error("{stage} thread panicked: {message}")]
    StagePanicked { stage: &'static str, message: String },

    #[error("Thread pool creation failed: {details}")]
    ThreadPoolCreation { details: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("invalid run state transition {from:?} -> {to:?}")]
    InvalidTransition { from: RunState, to: RunState },
}

impl EngineError {
    /// True for the empty-result condition, which callers usually report
    /// differently from I/O failures.
    pub const fn is_empty_result(&self) -> bool {
        matches!(self, Self::NoFilesFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Best-effort text for a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
