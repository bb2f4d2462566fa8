// crates/shared-kernel/src/value_objects/metrics.rs
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use super::counts::{FunctionCount, LineCount};

/// Counts produced for one analyzed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetrics {
    pub path: PathBuf,
    pub lines: LineCount,
    pub functions: FunctionCount,
}

impl FileMetrics {
    pub fn new(path: impl Into<PathBuf>, lines: LineCount, functions: FunctionCount) -> Self {
        Self {
            path: path.into(),
            lines,
            functions,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, lossily converted for display.
    ///
    /// Falls back to the whole path when it has no file name (e.g. `..`).
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map_or_else(|| self.path.to_string_lossy(), |name| name.to_string_lossy())
    }
}

/// Aggregate over every file analyzed in one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub lines: LineCount,
    pub functions: FunctionCount,
}

impl Summary {
    pub const fn new(files: usize, lines: LineCount, functions: FunctionCount) -> Self {
        Self {
            files,
            lines,
            functions,
        }
    }

    pub fn absorb(&mut self, metrics: &FileMetrics) {
        self.files += 1;
        self.lines += metrics.lines;
        self.functions += metrics.functions;
    }

    pub const fn is_empty(&self) -> bool {
        self.files == 0
    }
}

impl<'a> FromIterator<&'a FileMetrics> for Summary {
    fn from_iter<I: IntoIterator<Item = &'a FileMetrics>>(iter: I) -> Self {
        let mut summary = Self::default();
        for metrics in iter {
            summary.absorb(metrics);
        }
        summary
    }
}
