// crates/engine/src/lib.rs
use std::path::PathBuf;
use std::thread;

use gometrics_shared_kernel::Summary;
use log::{debug, info, warn};

pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod dialect;
pub mod error;
pub mod function_counter;
pub mod line_counter;
pub mod pool;
pub mod scanner;
pub mod sink;
pub mod state;
pub mod totals;

use crate::cache::ContentCache;
use crate::config::Config;
use crate::diagnostics::{ErrorCollector, Failure};
use crate::error::{EngineError, Result, panic_message};
use crate::pool::{AnalysisContext, AnalysisPool};
use crate::scanner::{DirectoryScanner, FileTask, read_worker};
use crate::sink::ResultSink;
use crate::state::{RunState, RunTracker};
use crate::totals::Totals;

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub root: PathBuf,
    pub summary: Summary,
    /// Candidate paths the walker emitted.
    pub files_discovered: usize,
    /// Files left out because they were binary or not Go.
    pub files_skipped: usize,
    /// Non-fatal problems, in the order they were recorded.
    pub failures: Vec<Failure>,
}

/// Run the counting pipeline.
///
/// Stages: one walker, `config.readers` readers filling the content cache,
/// and `config.workers` analysis workers. Each per-file result is passed to
/// `sink` as soon as it is ready. Returns after every stage has been joined.
///
/// # Errors
///
/// Returns an error for fatal conditions: invalid configuration, a missing
/// or unreadable root, a pool that cannot be created, a panic while
/// analyzing a file, or a tree with no `.go` files at all. Per-file problems
/// are reported through [`RunReport::failures`].
pub fn run<S>(config: &Config, sink: &S) -> Result<RunReport>
where
    S: ResultSink + ?Sized,
{
    let mut tracker = RunTracker::new();

    let scanner = DirectoryScanner::new(&config.walk);
    let pool = config
        .validate()
        .and_then(|()| scanner.check_root())
        .and_then(|()| AnalysisPool::new(config.workers, config.comment_style))
        .map_err(|e| tracker.abort(e))?;

    tracker.advance(RunState::Scanning)?;

    let cache = ContentCache::with_capacity(config.queue_capacity);
    let totals = Totals::new();
    let errors = ErrorCollector::new();
    let (task_tx, task_rx) = crossbeam_channel::bounded::<FileTask>(config.queue_capacity);
    let (ready_tx, ready_rx) = crossbeam_channel::bounded::<FileTask>(config.queue_capacity);

    let discovered = thread::scope(|s| -> Result<usize> {
        let walker = {
            let errors = &errors;
            thread::Builder::new()
                .name("gometrics-walker".into())
                .spawn_scoped(s, move || scanner.discover(&task_tx, errors))
                .map_err(|e| EngineError::ThreadPoolCreation {
                    details: e.to_string(),
                })?
        };

        let mut readers = Vec::with_capacity(config.readers);
        for id in 0..config.readers {
            let tasks = task_rx.clone();
            let ready = ready_tx.clone();
            let (cache, errors) = (&cache, &errors);
            let spawned = thread::Builder::new()
                .name(format!("gometrics-reader-{id}"))
                .spawn_scoped(s, move || {
                    read_worker(&tasks, &ready, cache, errors)
                });
            match spawned {
                Ok(handle) => readers.push(handle),
                Err(e) => {
                    errors.fatal(EngineError::ThreadPoolCreation {
                        details: e.to_string(),
                    });
                    break;
                }
            }
        }
        drop(ready_tx);

        let analysis = {
            let ctx = AnalysisContext {
                cache: &cache,
                totals: &totals,
                errors: &errors,
                sink,
            };
            let (pool, ready_rx) = (&pool, ready_rx);
            s.spawn(move || pool.drain(&ready_rx, &ctx))
        };

        if readers.is_empty() {
            // Nobody else would drain the walker's queue.
            for _ in &task_rx {}
        }
        drop(task_rx);

        let discovered = walker.join().unwrap_or_else(|payload| {
            errors.fatal(EngineError::StagePanicked {
                stage: "walker",
                message: panic_message(payload.as_ref()),
            });
            0
        });
        tracker.advance(RunState::Draining)?;

        let mut read = 0usize;
        for handle in readers {
            match handle.join() {
                Ok(n) => read += n,
                Err(payload) => errors.fatal(EngineError::StagePanicked {
                    stage: "reader",
                    message: panic_message(payload.as_ref()),
                }),
            }
        }
        if let Err(payload) = analysis.join() {
            errors.fatal(EngineError::StagePanicked {
                stage: "analysis",
                message: panic_message(payload.as_ref()),
            });
        }
        debug!("{read} of {discovered} discovered files read into the cache");

        Ok(discovered)
    })
    .map_err(|e| tracker.abort(e))?;

    tracker.advance(RunState::Joined)?;

    let summary = totals.summary();
    let files_skipped = totals.skipped();
    let (fatal, failures) = errors.finish();
    if let Some(err) = fatal {
        return Err(tracker.abort(err));
    }

    if discovered == 0 {
        for failure in &failures {
            warn!("{failure}");
        }
        return Err(tracker.abort(EngineError::NoFilesFound {
            path: config.walk.root.clone(),
            extension: dialect::GO.extension,
        }));
    }

    tracker.advance(RunState::Reported)?;
    info!(
        "counted {} lines and {} functions in {} files ({} skipped, {} failures)",
        summary.lines,
        summary.functions,
        summary.files,
        files_skipped,
        failures.len()
    );

    Ok(RunReport {
        root: config.walk.root.clone(),
        summary,
        files_discovered: discovered,
        files_skipped,
        failures,
    })
}
