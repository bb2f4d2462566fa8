use std::sync::atomic::{AtomicUsize, Ordering};

use gometrics_shared_kernel::{FileMetrics, FunctionCount, LineCount, Summary};

/// Per-run accumulator. Workers only ever `fetch_add`; the owner reads a
/// [`Summary`] once every worker has been joined, so relaxed ordering is
/// sufficient: the join supplies the happens-before edge.
#[derive(Debug, Default)]
pub struct Totals {
    lines: AtomicUsize,
    functions: AtomicUsize,
    files: AtomicUsize,
    skipped: AtomicUsize,
}

impl Totals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, metrics: &FileMetrics) {
        self.lines.fetch_add(metrics.lines.value(), Ordering::Relaxed);
        self.functions
            .fetch_add(metrics.functions.value(), Ordering::Relaxed);
        self.files.fetch_add(1, Ordering::Relaxed);
    }

    /// A file deliberately left out (binary or not Go).
    pub fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> Summary {
        Summary::new(
            self.files.load(Ordering::Relaxed),
            LineCount::new(self.lines.load(Ordering::Relaxed)),
            FunctionCount::new(self.functions.load(Ordering::Relaxed)),
        )
    }

    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_records_sum_exactly() {
        let totals = Totals::new();

        thread::scope(|s| {
            for _ in 0..16 {
                s.spawn(|| {
                    for i in 0..250 {
                        let metrics = FileMetrics::new(
                            format!("{i}.go"),
                            LineCount::new(3),
                            FunctionCount::new(i % 2),
                        );
                        totals.record(&metrics);
                    }
                    totals.record_skip();
                });
            }
        });

        let summary = totals.summary();
        assert_eq!(summary.files, 4000);
        assert_eq!(summary.lines, 12_000usize);
        assert_eq!(summary.functions, 2000usize);
        assert_eq!(totals.skipped(), 16);
    }

    #[test]
    fn fresh_totals_are_empty() {
        let totals = Totals::new();
        assert!(totals.summary().is_empty());
        assert_eq!(totals.skipped(), 0);
    }
}
