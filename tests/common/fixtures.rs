use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const A_GO: &str = "package a

import \"strings\"

// Upper shouts.
func Upper(s string) string {
\treturn strings.ToUpper(s)
}
";

pub const B_GO: &str = "package b

type T struct{}

var x = 1

func (T) M() int {
\treturn x
}

func F() {
}
";

/// A throwaway Go project on disk.
pub struct GoProject {
    dir: TempDir,
}

#[allow(dead_code)]
impl GoProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// `a.go` (5 lines, 1 function), `b.go` (8 lines, 2 functions) and `c.txt`.
    pub fn sample() -> Self {
        Self::new()
            .with_file("a.go", A_GO)
            .with_file("b.go", B_GO)
            .with_file("c.txt", "func NotGo() {}\n")
    }

    pub fn with_file(self, rel: &str, body: impl AsRef<[u8]>) -> Self {
        self.write(rel, body);
        self
    }

    pub fn write(&self, rel: &str, body: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, body).unwrap();
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

pub fn gometrics() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gometrics"));
    for var in [
        "GOMETRICS_LOG",
        "GOMETRICS_WORKERS",
        "GOMETRICS_READERS",
        "GOMETRICS_QUEUE_CAPACITY",
    ] {
        cmd.env_remove(var);
    }
    cmd
}
