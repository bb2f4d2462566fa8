use predicates::prelude::*;

use crate::common::gometrics;

#[test]
fn shows_help() {
    gometrics()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("gometrics"))
        .stdout(predicate::str::contains("--comment-style"));
}

#[test]
fn short_version_flag() {
    gometrics()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_path_prints_usage() {
    gometrics()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("Error:").not())
        .stderr(predicate::str::is_empty());
}

#[test]
fn rejects_zero_workers() {
    gometrics()
        .args(["--workers", "0", "."])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error: invalid value '0' for --workers"));
}

#[test]
fn rejects_unknown_comment_style() {
    gometrics()
        .args(["--comment-style", "fuzzy", "."])
        .assert()
        .failure();
}
