// src/presentation.rs
use std::env;
use std::fmt::Display;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use gometrics_engine::diagnostics::Failure;
use gometrics_engine::sink::ResultSink;
use gometrics_shared_kernel::{FileMetrics, Summary};

const RULE: &str = "-------------";

/// Name shown in the header: the last path component, or the working
/// directory's name when `path` is `.`.
pub fn project_name(path: &Path) -> String {
    let resolved = if path == Path::new(".") {
        env::current_dir().ok()
    } else {
        None
    };
    let path = resolved.as_deref().unwrap_or(path);

    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            fs::canonicalize(path)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| path.display().to_string())
}

/// Line-oriented report writer. Per-file lines arrive from many workers,
/// so the writer sits behind a mutex and each line is written whole.
#[derive(Debug)]
pub struct ConsolePrinter<W> {
    out: Mutex<W>,
}

impl<W: Write> ConsolePrinter<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn header(&self, project: &str) -> io::Result<()> {
        let mut out = self.lock();
        writeln!(out, "Project Name: {project}")?;
        writeln!(out, "{RULE}")
    }

    pub fn summary(&self, summary: &Summary, elapsed: Option<Duration>) -> io::Result<()> {
        let mut out = self.lock();
        writeln!(out, "{RULE}")?;
        writeln!(out, "Total lines in .go files: {}", summary.lines)?;
        writeln!(out, "Total functions in .go files: {}", summary.functions)?;
        if let Some(elapsed) = elapsed {
            writeln!(out, "Time taken: {elapsed:?}")?;
        }
        out.flush()
    }

    pub fn error(&self, err: &dyn Display) -> io::Result<()> {
        let mut out = self.lock();
        writeln!(out, "Error: {err}")?;
        out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> ResultSink for ConsolePrinter<W> {
    fn on_file(&self, metrics: &FileMetrics) {
        let written = writeln!(
            self.lock(),
            "Lines in {}: {}; Functions: {}",
            metrics.file_name(),
            metrics.lines,
            metrics.functions
        );
        if let Err(err) = written {
            tracing::debug!("dropping output line for {}: {err}", metrics.path.display());
        }
    }
}

/// One `[warn]` line per non-fatal failure.
pub fn print_failures<W: Write>(out: &mut W, failures: &[Failure]) -> io::Result<()> {
    for failure in failures {
        writeln!(out, "[warn] {failure}")?;
    }
    Ok(())
}
