//! Error collection shared by every pipeline stage.
//!
//! Non-fatal problems travel through an unbounded channel that is drained
//! once all workers have joined. The first fatal error wins a single slot and
//! raises the cancel flag; later fatal errors are logged and dropped.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A subtree could not be listed.
    Walk,
    /// A discovered file could not be read.
    Read,
    /// A file was read but is not valid Go; its function count is zero.
    Parse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Walk => "walk",
            Self::Read => "read",
            Self::Parse => "parse",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub path: PathBuf,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error in {}: {}", self.kind, self.path.display(), self.message)
    }
}

/// Collection point handed to every stage of one run.
#[derive(Debug)]
pub struct ErrorCollector {
    failures: Sender<Failure>,
    drain: Receiver<Failure>,
    fatal: OnceLock<EngineError>,
    cancelled: AtomicBool,
}

impl Default for ErrorCollector {
    fn default() -> Self {
        let (failures, drain) = crossbeam_channel::unbounded();
        Self {
            failures,
            drain,
            fatal: OnceLock::new(),
            cancelled: AtomicBool::new(false),
        }
    }
}

impl ErrorCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure(&self, kind: FailureKind, path: &Path, message: impl Into<String>) {
        let failure = Failure::new(kind, path, message);
        debug!("{failure}");
        // The receiver lives in `self`, so the send cannot fail.
        let _ = self.failures.send(failure);
    }

    /// Record a fatal error and ask every stage to stop.
    pub fn fatal(&self, error: EngineError) {
        if let Err(later) = self.fatal.set(error) {
            warn!("additional fatal error after cancellation: {later}");
        }
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Consume the collector after the join barrier.
    pub fn finish(self) -> (Option<EngineError>, Vec<Failure>) {
        let Self {
            failures,
            drain,
            fatal,
            ..
        } = self;
        drop(failures);
        (fatal.into_inner(), drain.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_drained_in_order() {
        let errors = ErrorCollector::new();
        errors.failure(FailureKind::Read, Path::new("a.go"), "permission denied");
        errors.failure(FailureKind::Parse, Path::new("b.go"), "syntax error at 3:1");

        let (fatal, failures) = errors.finish();
        assert!(fatal.is_none());
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].kind, FailureKind::Read);
        assert_eq!(
            failures[1].to_string(),
            "parse error in b.go: syntax error at 3:1"
        );
    }

    #[test]
    fn first_fatal_wins_and_cancels() {
        let errors = ErrorCollector::new();
        assert!(!errors.is_cancelled());

        errors.fatal(EngineError::Config("first".into()));
        errors.fatal(EngineError::Config("second".into()));
        assert!(errors.is_cancelled());

        let (fatal, _) = errors.finish();
        assert!(matches!(fatal, Some(EngineError::Config(msg)) if msg == "first"));
    }
}
