use crate::error::{EngineError, Result};
use crate::line_counter::CommentStyle;
use derive_builder::Builder;
use std::path::PathBuf;

/// Default capacity of both pipeline queues.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Worker count used when none is configured: one per CPU, kept within 8..=16.
#[must_use]
pub fn default_workers() -> usize {
    num_cpus::get().clamp(8, 16)
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default = "PathBuf::from(\".\")")]
    pub root: PathBuf,
    /// Walker threads; `0` lets `ignore` pick.
    #[builder(default)]
    pub threads: usize,
    #[builder(default)]
    pub skip_hidden: bool,
    #[builder(default)]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            threads: 0,
            skip_hidden: false,
            git_ignore: false,
            max_depth: None,
            follow_links: false,
        }
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,
    /// Analysis workers.
    #[builder(default = "default_workers()")]
    pub workers: usize,
    /// Reader workers filling the content cache.
    #[builder(default = "default_workers()")]
    pub readers: usize,
    /// Capacity of the task queue and of the analysis queue.
    #[builder(default = "DEFAULT_QUEUE_CAPACITY")]
    pub queue_capacity: usize,
    #[builder(default)]
    pub comment_style: CommentStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            walk: WalkOptions::default(),
            workers: default_workers(),
            readers: default_workers(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            comment_style: CommentStyle::default(),
        }
    }
}

impl Config {
    /// Shorthand for a default configuration rooted at `root`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            walk: WalkOptions {
                root: root.into(),
                ..WalkOptions::default()
            },
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when a pool size or queue capacity is zero.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(EngineError::Config("workers must be at least 1".into()));
        }
        if self.readers == 0 {
            return Err(EngineError::Config("readers must be at least 1".into()));
        }
        if self.queue_capacity == 0 {
            return Err(EngineError::Config(
                "queue capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
