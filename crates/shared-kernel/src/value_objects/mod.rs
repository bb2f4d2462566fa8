// crates/shared-kernel/src/value_objects/mod.rs
pub mod counts;
pub mod metrics;

pub use counts::{FunctionCount, LineCount};
pub use metrics::{FileMetrics, Summary};
