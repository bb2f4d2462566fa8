//! Directory discovery and the reader stage that fills the content cache.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender};
use ignore::{WalkBuilder, WalkState};
use log::trace;

use crate::cache::ContentCache;
use crate::config::WalkOptions;
use crate::diagnostics::{ErrorCollector, FailureKind};
use crate::dialect::{Dialect, GO};
use crate::error::{EngineError, Result};

/// A discovered source file on its way through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy)]
pub struct DirectoryScanner<'a> {
    options: &'a WalkOptions,
    dialect: Dialect,
}

impl<'a> DirectoryScanner<'a> {
    pub const fn new(options: &'a WalkOptions) -> Self {
        Self {
            options,
            dialect: GO,
        }
    }

    pub fn root(&self) -> &Path {
        &self.options.root
    }

    /// Fatal pre-flight: the root must exist and, for a directory, be listable.
    ///
    /// # Errors
    ///
    /// [`EngineError::RootNotFound`] or [`EngineError::RootUnreadable`].
    pub fn check_root(&self) -> Result<()> {
        let root = self.root();
        let meta = fs::metadata(root).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                EngineError::RootNotFound {
                    path: root.to_path_buf(),
                }
            } else {
                EngineError::RootUnreadable {
                    path: root.to_path_buf(),
                    source,
                }
            }
        })?;

        if meta.is_dir() {
            fs::read_dir(root).map_err(|source| EngineError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Parallel walk sending every regular file with the dialect's extension.
    ///
    /// Blocks while `tasks` is full. Stops early once the run is cancelled or
    /// the receiving side is gone. Errors below the root are recorded as
    /// [`FailureKind::Walk`] and the walk continues with the siblings.
    ///
    /// Returns how many files were discovered.
    pub fn discover(&self, tasks: &Sender<FileTask>, errors: &ErrorCollector) -> usize {
        let discovered = AtomicUsize::new(0);
        let options = self.options;

        let mut builder = WalkBuilder::new(&options.root);
        builder
            .standard_filters(false)
            .hidden(options.skip_hidden)
            .git_ignore(options.git_ignore)
            .require_git(false)
            .follow_links(options.follow_links)
            .max_depth(options.max_depth)
            .threads(options.threads);

        let dialect = self.dialect;
        builder.build_parallel().run(|| {
            let tasks = tasks.clone();
            let discovered = &discovered;
            Box::new(move |entry: std::result::Result<ignore::DirEntry, ignore::Error>| {
                if errors.is_cancelled() {
                    return WalkState::Quit;
                }

                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        let path = error_path(&err).unwrap_or(&options.root);
                        errors.failure(FailureKind::Walk, path, err.to_string());
                        return WalkState::Continue;
                    }
                };

                let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
                if !is_file || !dialect.matches_path(entry.path()) {
                    return WalkState::Continue;
                }

                discovered.fetch_add(1, Ordering::Relaxed);
                if tasks.send(FileTask { path: entry.into_path() }).is_err() {
                    return WalkState::Quit;
                }
                WalkState::Continue
            })
        });

        discovered.into_inner()
    }
}

/// Reader stage: pull tasks, load bytes into the cache, pass the task on.
///
/// The cache write happens before the send, so an analysis worker that
/// receives the task always finds the bytes. Keeps draining `tasks` after a
/// cancellation or a vanished analysis stage so the walker never blocks.
pub fn read_worker(
    tasks: &Receiver<FileTask>,
    ready: &Sender<FileTask>,
    cache: &ContentCache,
    errors: &ErrorCollector,
) -> usize {
    let mut read = 0usize;
    for task in tasks {
        if errors.is_cancelled() {
            continue;
        }
        match fs::read(&task.path) {
            Ok(bytes) => {
                cache.set(task.path.clone(), bytes);
                read += 1;
                if ready.send(task).is_err() {
                    trace!("analysis queue closed; discarding remaining tasks");
                }
            }
            Err(err) => errors.failure(FailureKind::Read, &task.path, err.to_string()),
        }
    }
    read
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::Loop { child, .. } => Some(child),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}
