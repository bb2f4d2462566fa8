use std::sync::Mutex;

use gometrics_shared_kernel::FileMetrics;

/// Receives per-file results as analysis workers produce them.
///
/// Called concurrently from every worker and in no particular order.
pub trait ResultSink: Sync {
    fn on_file(&self, metrics: &FileMetrics);
}

impl<F> ResultSink for F
where
    F: Fn(&FileMetrics) + Sync,
{
    fn on_file(&self, metrics: &FileMetrics) {
        self(metrics);
    }
}

/// Keeps every result in memory; handy for library callers and tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    files: Mutex<Vec<FileMetrics>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected results sorted by path.
    pub fn into_sorted(self) -> Vec<FileMetrics> {
        let mut files = self
            .files
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }
}

impl ResultSink for CollectingSink {
    fn on_file(&self, metrics: &FileMetrics) {
        self.files
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(metrics.clone());
    }
}
