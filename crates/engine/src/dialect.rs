//! Knowledge about the one source dialect the engine understands.

use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub name: &'static str,
    /// Extension without the leading dot, compared case-sensitively.
    pub extension: &'static str,
    /// Bytes that mark a whole line as a comment under [`CommentStyle::Prefix`].
    ///
    /// [`CommentStyle::Prefix`]: crate::line_counter::CommentStyle::Prefix
    pub comment_markers: &'static [u8],
    /// Keyword every source file must open with.
    pub package_keyword: &'static [u8],
}

pub const GO: Dialect = Dialect {
    name: "Go",
    extension: "go",
    comment_markers: b"/#",
    package_keyword: b"package",
};

impl Dialect {
    pub fn matches_path(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == self.extension)
    }

    #[inline]
    pub fn is_comment_marker(&self, byte: u8) -> bool {
        self.comment_markers.contains(&byte)
    }

    /// True when the first token after whitespace, comments and an optional
    /// BOM is the package keyword.
    pub fn declares_package(&self, content: &[u8]) -> bool {
        let rest = skip_leading_trivia(content.strip_prefix(UTF8_BOM).unwrap_or(content));
        match rest.strip_prefix(self.package_keyword) {
            Some(after) => after
                .first()
                .is_some_and(|&b| b.is_ascii_whitespace() || b == b'/'),
            None => false,
        }
    }
}

/// NUL anywhere in the buffer marks it as binary.
#[inline]
pub fn is_binary(content: &[u8]) -> bool {
    memchr::memchr(0, content).is_some()
}

fn skip_leading_trivia(mut rest: &[u8]) -> &[u8] {
    loop {
        let trimmed = rest.trim_ascii_start();
        if let Some(comment) = trimmed.strip_prefix(b"//") {
            match memchr::memchr(b'\n', comment) {
                Some(end) => rest = &comment[end + 1..],
                None => return &[],
            }
        } else if let Some(comment) = trimmed.strip_prefix(b"/*") {
            match memchr::memmem::find(comment, b"*/") {
                Some(end) => rest = &comment[end + 2..],
                None => return &[],
            }
        } else {
            return trimmed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_go_extension_only() {
        assert!(GO.matches_path(Path::new("cmd/main.go")));
        assert!(!GO.matches_path(Path::new("notes.txt")));
        assert!(!GO.matches_path(Path::new("main.GO")));
        assert!(!GO.matches_path(Path::new("go")));
        assert!(!GO.matches_path(Path::new("archive.go.bak")));
    }

    #[test]
    fn package_clause_detection() {
        assert!(GO.declares_package(b"package main\n"));
        assert!(GO.declares_package(b"\xEF\xBB\xBFpackage main\n"));
        assert!(GO.declares_package(b"\n\n  package util\n"));
        assert!(GO.declares_package(
            b"// Copyright 2024\n// license\n\n/* build notes\n */\npackage foo\n"
        ));
        assert!(!GO.declares_package(b"packagemain\n"));
        assert!(!GO.declares_package(b"func main() {}\n"));
        assert!(!GO.declares_package(b"// only a comment"));
        assert!(!GO.declares_package(b"/* unterminated"));
        assert!(!GO.declares_package(b""));
    }

    #[test]
    fn nul_byte_marks_binary() {
        assert!(is_binary(b"package main\x00\n"));
        assert!(!is_binary(b"package main\n"));
        assert!(!is_binary(b""));
    }

    #[test]
    fn comment_markers() {
        assert!(GO.is_comment_marker(b'/'));
        assert!(GO.is_comment_marker(b'#'));
        assert!(!GO.is_comment_marker(b'p'));
    }
}
