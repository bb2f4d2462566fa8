// src/cli/args.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use super::value_enum::CommentStyleArg;

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "gometrics",
    version = crate::VERSION,
    about = "Counts lines and functions in .go files",
    long_about = Some(include_str!("../../usage.txt")),
    disable_version_flag = true
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Directory or .go file to analyze
    #[arg(value_hint = ValueHint::AnyPath)]
    pub path: Option<PathBuf>,

    /// Print the elapsed wall-clock time after the totals
    #[arg(short = 't', long)]
    pub time: bool,

    /// Print version information
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Analysis workers [default: CPU count, kept within 8..=16]
    #[arg(long, env = "GOMETRICS_WORKERS", help_heading = "Performance")]
    pub workers: Option<usize>,

    /// Reader threads loading files ahead of analysis [default: same as workers]
    #[arg(long, env = "GOMETRICS_READERS", help_heading = "Performance")]
    pub readers: Option<usize>,

    /// Capacity of each pipeline queue
    #[arg(
        long,
        env = "GOMETRICS_QUEUE_CAPACITY",
        default_value_t = gometrics_engine::config::DEFAULT_QUEUE_CAPACITY,
        help_heading = "Performance"
    )]
    pub queue_capacity: usize,

    /// How comment lines are recognized
    #[arg(long, value_enum, default_value = "lexical", help_heading = "Counting")]
    pub comment_style: CommentStyleArg,

    /// Honor .gitignore files
    #[arg(long, help_heading = "Walking")]
    pub gitignore: bool,

    /// Skip hidden files and directories
    #[arg(long, help_heading = "Walking")]
    pub skip_hidden: bool,

    /// Follow symbolic links
    #[arg(long, help_heading = "Walking")]
    pub follow_links: bool,

    /// Maximum directory depth below the path
    #[arg(long, help_heading = "Walking")]
    pub max_depth: Option<usize>,

    /// More log output on stderr (-v is --version; repeat --verbose)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,
}
