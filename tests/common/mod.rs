// tests/common/mod.rs
//! Shared fixtures for the CLI tests.

pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;
