// tests/integration/end_to_end.rs
use predicates::prelude::*;

use crate::common::{GoProject, gometrics};

#[test]
fn reports_files_and_totals() {
    let project = GoProject::sample();
    let name = project
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();

    let output = gometrics().arg(project.path()).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines[0], format!("Project Name: {name}"));
    assert_eq!(lines[1], "-------------");

    let mut per_file = lines[2..4].to_vec();
    per_file.sort_unstable();
    assert_eq!(
        per_file,
        [
            "Lines in a.go: 5; Functions: 1",
            "Lines in b.go: 8; Functions: 2"
        ]
    );

    assert_eq!(
        &lines[4..],
        [
            "-------------",
            "Total lines in .go files: 13",
            "Total functions in .go files: 3"
        ]
    );
    assert!(!stdout.contains("c.txt"));
}

#[test]
fn time_flag_adds_elapsed_line() {
    let project = GoProject::sample();
    gometrics()
        .arg("--time")
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Time taken: "));

    gometrics()
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Time taken").not());
}

#[test]
fn empty_directory_is_an_error() {
    let project = GoProject::new().with_file("README.md", "# nothing\n");
    gometrics()
        .arg(project.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error: no .go files found in"))
        .stdout(predicate::str::contains("Total lines").not());
}

#[test]
fn missing_root_is_an_error() {
    let project = GoProject::new();
    gometrics()
        .arg(project.path().join("does-not-exist"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("does not exist"))
        .stdout(predicate::str::contains("Total lines").not());
}

#[test]
fn malformed_file_warns_on_stderr() {
    let project = GoProject::sample().with_file("bad.go", "package bad\n\nfunc broken( {\n");
    gometrics()
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Lines in bad.go: 2; Functions: 0"))
        .stdout(predicate::str::contains("Total functions in .go files: 3"))
        .stderr(predicate::str::contains("[warn] parse error in"));
}

#[test]
fn binary_file_is_not_reported() {
    let project = GoProject::sample().with_file("blob.go", b"package blob\n\x00".as_slice());
    gometrics()
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("blob.go").not())
        .stdout(predicate::str::contains("Total lines in .go files: 13"));
}

#[test]
fn walk_flags_are_honored() {
    let project = GoProject::sample()
        .with_file(".gitignore", "vendor/\n")
        .with_file("vendor/dep/dep.go", "package dep\n\nfunc Dep() {}\n");

    gometrics()
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total functions in .go files: 4"));

    gometrics()
        .args(["--gitignore", "--workers", "1", "--queue-capacity", "1"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total functions in .go files: 3"));
}

#[test]
fn prefix_style_is_selectable() {
    let project = GoProject::new().with_file(
        "doc.go",
        "package doc\n\n/*\nPackage doc explains.\n*/\nfunc Do() {}\n",
    );

    gometrics()
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Lines in doc.go: 2; Functions: 1"));

    gometrics()
        .args(["--comment-style", "prefix"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Lines in doc.go: 4; Functions: 1"));
}
