// src/lib.rs
pub mod cli;
pub mod logging;
pub mod presentation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
