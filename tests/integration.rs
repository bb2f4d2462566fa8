//! Integration test suite driving the `gometrics` binary.

mod common;

#[path = "cli/smoke_tests.rs"]
mod smoke_tests;
#[path = "integration/end_to_end.rs"]
mod end_to_end;
