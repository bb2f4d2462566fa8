mod args;
mod value_enum;

use std::path::PathBuf;

use anyhow::{Result, bail};
pub use args::Args;
pub use value_enum::CommentStyleArg;

use gometrics_engine::config::{Config, WalkOptions, default_workers};

const MAX_THREADS: usize = 512;
const MAX_QUEUE_CAPACITY: usize = 1_000_000;

fn validate_numeric_args(
    workers: Option<usize>,
    readers: Option<usize>,
    queue_capacity: usize,
) -> Result<()> {
    validate_threads("--workers", workers)?;
    validate_threads("--readers", readers)?;
    validate_range("--queue-capacity", queue_capacity, MAX_QUEUE_CAPACITY)?;
    Ok(())
}

fn validate_threads(flag: &str, value: Option<usize>) -> Result<()> {
    match value {
        Some(n) => validate_range(flag, n, MAX_THREADS),
        None => Ok(()),
    }
}

fn validate_range(flag: &str, value: usize, max: usize) -> Result<()> {
    if !(1..=max).contains(&value) {
        bail!("invalid value '{value}' for {flag}: must be between 1 and {max}");
    }
    Ok(())
}

/// Turn parsed arguments into an engine configuration for `path`.
///
/// # Errors
///
/// Fails when a pool size or the queue capacity is out of range.
pub fn build_config(args: &Args, path: PathBuf) -> Result<Config> {
    validate_numeric_args(args.workers, args.readers, args.queue_capacity)?;

    let workers = args.workers.unwrap_or_else(default_workers);
    Ok(Config {
        walk: WalkOptions {
            root: path,
            skip_hidden: args.skip_hidden,
            git_ignore: args.gitignore,
            max_depth: args.max_depth,
            follow_links: args.follow_links,
            ..WalkOptions::default()
        },
        workers,
        readers: args.readers.unwrap_or(workers),
        queue_capacity: args.queue_capacity,
        comment_style: args.comment_style.into(),
    })
}
