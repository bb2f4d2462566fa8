//! Fixed-size analysis pool draining the ready queue.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crossbeam_channel::Receiver;
use gometrics_shared_kernel::FileMetrics;
use log::{debug, trace};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::cache::ContentCache;
use crate::diagnostics::{ErrorCollector, FailureKind};
use crate::dialect::{self, GO};
use crate::error::{EngineError, Result, panic_message};
use crate::function_counter::count_functions;
use crate::line_counter::{CommentStyle, count_lines, physical_lines};
use crate::scanner::FileTask;
use crate::sink::ResultSink;
use crate::totals::Totals;

/// Why a file was left out of the totals on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Contains a NUL byte.
    Binary,
    /// Does not open with a package clause.
    NotSource,
}

/// Result of analyzing one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    Skipped(SkipReason),
    Counted {
        metrics: FileMetrics,
        /// Parse diagnostic when the function count was degraded to zero.
        diagnostic: Option<String>,
    },
}

/// Classify and count one file's content. No side effects.
pub fn analyze(path: &Path, content: &[u8], style: CommentStyle) -> Analysis {
    if dialect::is_binary(content) {
        return Analysis::Skipped(SkipReason::Binary);
    }
    if !GO.declares_package(content) {
        return Analysis::Skipped(SkipReason::NotSource);
    }

    let lines = count_lines(content, style);
    let parsed = count_functions(content);
    Analysis::Counted {
        metrics: FileMetrics::new(path, lines, parsed.functions()),
        diagnostic: parsed.diagnostic().map(str::to_owned),
    }
}

/// Shared state every analysis worker reads from or folds into.
pub struct AnalysisContext<'a, S: ?Sized> {
    pub cache: &'a ContentCache,
    pub totals: &'a Totals,
    pub errors: &'a ErrorCollector,
    pub sink: &'a S,
}

pub struct AnalysisPool {
    pool: ThreadPool,
    workers: usize,
    style: CommentStyle,
}

impl AnalysisPool {
    /// # Errors
    ///
    /// [`EngineError::ThreadPoolCreation`] if the worker threads cannot be spawned.
    pub fn new(workers: usize, style: CommentStyle) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("gometrics-analysis-{i}"))
            .build()
            .map_err(|e| EngineError::ThreadPoolCreation {
                details: e.to_string(),
            })?;
        Ok(Self {
            pool,
            workers,
            style,
        })
    }

    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Run one worker per pool thread until `queue` is closed and empty.
    ///
    /// Returns only after every worker has finished.
    pub fn drain<S>(&self, queue: &Receiver<FileTask>, ctx: &AnalysisContext<'_, S>)
    where
        S: ResultSink + ?Sized,
    {
        self.pool.scope(|scope| {
            for id in 0..self.workers {
                scope.spawn(move |_| self.work(id, queue, ctx));
            }
        });
    }

    fn work<S>(&self, id: usize, queue: &Receiver<FileTask>, ctx: &AnalysisContext<'_, S>)
    where
        S: ResultSink + ?Sized,
    {
        let mut handled = 0usize;
        for task in queue {
            if ctx.errors.is_cancelled() {
                continue;
            }
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| self.process(&task.path, ctx)));
            match outcome {
                Ok(()) => handled += 1,
                Err(payload) => ctx.errors.fatal(EngineError::WorkerPanicked {
                    path: task.path,
                    message: panic_message(payload.as_ref()),
                }),
            }
        }
        trace!("analysis worker {id} finished after {handled} files");
    }

    fn process<S>(&self, path: &Path, ctx: &AnalysisContext<'_, S>)
    where
        S: ResultSink + ?Sized,
    {
        let content = match ctx.cache.get(path) {
            Some(content) => content,
            None => {
                debug!("cache miss for {}; reading directly", path.display());
                match fs::read(path) {
                    Ok(bytes) => bytes.into(),
                    Err(err) => {
                        ctx.errors.failure(FailureKind::Read, path, err.to_string());
                        return;
                    }
                }
            }
        };

        match analyze(path, &content, self.style) {
            Analysis::Skipped(reason) => {
                debug!("skipping {} ({reason:?})", path.display());
                ctx.totals.record_skip();
            }
            Analysis::Counted {
                metrics,
                diagnostic,
            } => {
                if let Some(diagnostic) = diagnostic {
                    ctx.errors.failure(FailureKind::Parse, path, diagnostic);
                }
                debug!(
                    "{}: {} significant of {} lines, {} functions",
                    path.display(),
                    metrics.lines,
                    physical_lines(&content),
                    metrics.functions
                );
                ctx.sink.on_file(&metrics);
                ctx.totals.record(&metrics);
            }
        }
    }
}
