//! # Significant line counting
//!
//! A line is significant when it is not blank and not a pure comment line.
//! Two classifiers are available:
//!
//! | Style | Rule |
//! |-------|------|
//! | [`CommentStyle::Prefix`] | first non-whitespace byte is a dialect comment marker (`/` or `#`) |
//! | [`CommentStyle::Lexical`] | Go-aware scan of `//`, `/* */`, string, rune and raw string literals |
//!
//! `Prefix` reproduces the historical heuristic byte for byte: it misses block
//! comment bodies and treats a line such as `/ 2` or `*/` differently from a
//! lexer. `Lexical` is the default.
//!
//! Both work on raw bytes, so non-UTF-8 input never fails. The final line is
//! counted whether or not the buffer ends with a newline.

use gometrics_shared_kernel::LineCount;

use crate::dialect::{Dialect, GO};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CommentStyle {
    /// First non-whitespace byte decides.
    Prefix,
    /// Tokenizer-based comment detection.
    #[default]
    Lexical,
}

/// Classifies lines one at a time. Implementations may carry state across
/// lines (open block comments, raw strings).
pub trait LineProcessor {
    /// Returns 1 for a significant line, 0 otherwise.
    fn process_line(&mut self, line: &[u8]) -> usize;

    fn reset(&mut self);
}

/// Count significant lines of `content` using the Go dialect.
pub fn count_lines(content: &[u8], style: CommentStyle) -> LineCount {
    match style {
        CommentStyle::Prefix => count_with(content, &mut PrefixProcessor::new(GO)),
        CommentStyle::Lexical => count_with(content, &mut LexicalProcessor::default()),
    }
}

pub fn count_with<P: LineProcessor + ?Sized>(content: &[u8], processor: &mut P) -> LineCount {
    lines(content).map(|line| processor.process_line(line)).sum()
}

/// Raw line count, including the final unterminated line.
pub fn physical_lines(content: &[u8]) -> usize {
    let newlines = bytecount::count(content, b'\n');
    match content.last() {
        Some(&b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

/// Splits on `\n` and drops a trailing `\r`.
fn lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    content
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

#[derive(Debug, Clone, Copy)]
pub struct PrefixProcessor {
    dialect: Dialect,
}

impl PrefixProcessor {
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

impl LineProcessor for PrefixProcessor {
    fn process_line(&mut self, line: &[u8]) -> usize {
        match line.trim_ascii_start().first() {
            None => 0,
            Some(&b) if self.dialect.is_comment_marker(b) => 0,
            Some(_) => 1,
        }
    }

    fn reset(&mut self) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Code,
    BlockComment,
    RawString,
}

/// Go lexical classifier. Interpreted strings and runes cannot span lines,
/// block comments and raw strings can.
#[derive(Debug, Default)]
pub struct LexicalProcessor {
    mode: Mode,
}

impl LexicalProcessor {
    pub fn is_in_block_comment(&self) -> bool {
        self.mode == Mode::BlockComment
    }

    pub fn is_in_raw_string(&self) -> bool {
        self.mode == Mode::RawString
    }
}

impl LineProcessor for LexicalProcessor {
    fn process_line(&mut self, line: &[u8]) -> usize {
        let mut significant = false;
        let mut i = 0;

        while i < line.len() {
            match self.mode {
                Mode::BlockComment => match memchr::memmem::find(&line[i..], b"*/") {
                    Some(end) => {
                        i += end + 2;
                        self.mode = Mode::Code;
                    }
                    None => break,
                },
                Mode::RawString => {
                    let rest = &line[i..];
                    match memchr::memchr(b'`', rest) {
                        Some(end) => {
                            significant = true;
                            i += end + 1;
                            self.mode = Mode::Code;
                        }
                        None => {
                            significant |= !rest.trim_ascii().is_empty();
                            break;
                        }
                    }
                }
                Mode::Code => {
                    let b = line[i];
                    if b.is_ascii_whitespace() {
                        i += 1;
                        continue;
                    }
                    if b == b'/' {
                        match line.get(i + 1) {
                            Some(b'/') => break,
                            Some(b'*') => {
                                self.mode = Mode::BlockComment;
                                i += 2;
                                continue;
                            }
                            _ => {}
                        }
                    }
                    significant = true;
                    i = match b {
                        b'"' | b'\'' => skip_quoted(line, i + 1, b),
                        b'`' => {
                            self.mode = Mode::RawString;
                            i + 1
                        }
                        _ => i + 1,
                    };
                }
            }
        }

        usize::from(significant)
    }

    fn reset(&mut self) {
        self.mode = Mode::Code;
    }
}

/// Index just past the closing `quote`, honouring backslash escapes.
/// Unterminated literals run to the end of the line.
fn skip_quoted(line: &[u8], mut i: usize, quote: u8) -> usize {
    while i < line.len() {
        match line[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    line.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(src: &str) -> usize {
        count_lines(src.as_bytes(), CommentStyle::Prefix).value()
    }

    fn lexical(src: &str) -> usize {
        count_lines(src.as_bytes(), CommentStyle::Lexical).value()
    }

    #[test]
    fn counts_final_line_without_newline() {
        assert_eq!(prefix("package main\nfunc f() {}"), 2);
        assert_eq!(lexical("package main\nfunc f() {}"), 2);
        assert_eq!(lexical("package main\nfunc f() {}\n"), 2);
    }

    #[test]
    fn blank_and_comment_only_file_is_zero() {
        let src = "// header\n\n   \n\t// indented\n# hash\n";
        assert_eq!(prefix(src), 0);

        let src = "// header\n\n/* block\n   still comment\n*/\n   // tail\n";
        assert_eq!(lexical(src), 0);
    }

    #[test]
    fn crlf_endings() {
        assert_eq!(lexical("package main\r\n\r\n// c\r\nvar x = 1\r\n"), 2);
        assert_eq!(prefix("package main\r\n\r\n// c\r\nvar x = 1\r\n"), 2);
    }

    #[test]
    fn prefix_keeps_historical_approximation() {
        // Block comment bodies and closers are counted as code.
        let src = "/* start\nbody line\n*/\nx := 1\n";
        assert_eq!(prefix(src), 3);
        assert_eq!(lexical(src), 1);
    }

    #[test]
    fn trailing_comment_after_code_is_code() {
        assert_eq!(lexical("x := 1 // note\n"), 1);
        assert_eq!(lexical("x := 1 /* note */\n"), 1);
        assert_eq!(lexical("/* note */ x := 1\n"), 1);
        assert_eq!(lexical("/* a */ /* b */\n"), 0);
    }

    #[test]
    fn comment_markers_inside_strings_are_code() {
        let src = "s := \"// not a comment\"\nr := '/'\nu := \"/* nope\"\ny := 2\n";
        assert_eq!(lexical(src), 4);
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        assert_eq!(lexical("s := \"a\\\"/*\"\nz := 3\n"), 2);
    }

    #[test]
    fn raw_strings_span_lines() {
        let src = "q := `\n// inside raw\n\n/* also inside */\n`\n// real comment\n";
        // opener, two non-blank inner lines, closer
        assert_eq!(lexical(src), 4);
    }

    #[test]
    fn hash_is_code_for_lexical() {
        assert_eq!(lexical("# not go\n"), 1);
        assert_eq!(prefix("# not go\n"), 0);
    }

    #[test]
    fn non_utf8_input_is_counted() {
        let bytes = b"package main\n\xff\xfe garbage\n// c\n";
        assert_eq!(count_lines(bytes, CommentStyle::Lexical), 2usize);
        assert_eq!(count_lines(bytes, CommentStyle::Prefix), 2usize);
    }

    #[test]
    fn reset_clears_block_state() {
        let mut proc = LexicalProcessor::default();
        assert_eq!(proc.process_line(b"/* open"), 0);
        assert!(proc.is_in_block_comment());
        proc.reset();
        assert!(!proc.is_in_block_comment());
        assert_eq!(proc.process_line(b"func f() {}"), 1);

        assert_eq!(proc.process_line(b"s := `raw"), 1);
        assert!(proc.is_in_raw_string());
        proc.reset();
        assert!(!proc.is_in_raw_string());
    }

    #[test]
    fn physical_line_count() {
        assert_eq!(physical_lines(b""), 0);
        assert_eq!(physical_lines(b"a"), 1);
        assert_eq!(physical_lines(b"a\n"), 1);
        assert_eq!(physical_lines(b"a\n\nb"), 3);
    }
}
