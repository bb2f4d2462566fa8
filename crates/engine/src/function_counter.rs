//! Function declaration counting on a tree-sitter Go syntax tree.
//!
//! Only named top-level `func` declarations count, methods included.
//! Function literals (`func() { ... }` used as values) never count.
//!
//! Parser construction allocates and loads the grammar, so every thread
//! keeps one parser around and reuses it for each file it analyzes.

use std::cell::RefCell;

use gometrics_shared_kernel::FunctionCount;
use tree_sitter::{Node, Parser};

const DECLARATION_KINDS: &[&str] = &["function_declaration", "method_declaration"];

/// Outcome of parsing one file. A syntax error is data, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed { functions: FunctionCount },
    Malformed { diagnostic: String },
}

impl ParseOutcome {
    /// Function count with malformed files degraded to zero.
    pub fn functions(&self) -> FunctionCount {
        match self {
            Self::Parsed { functions } => *functions,
            Self::Malformed { .. } => FunctionCount::zero(),
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Parsed { .. } => None,
            Self::Malformed { diagnostic } => Some(diagnostic),
        }
    }
}

thread_local! {
    static PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

pub fn count_functions(content: &[u8]) -> ParseOutcome {
    PARSER.with(|cell| {
        // Taken out for the duration of the parse; a panic mid-parse simply
        // leaves the slot empty and the next call builds a fresh parser.
        let mut parser = match cell.borrow_mut().take() {
            Some(parser) => parser,
            None => match new_parser() {
                Ok(parser) => parser,
                Err(diagnostic) => return ParseOutcome::Malformed { diagnostic },
            },
        };
        let outcome = count_with(&mut parser, content);
        *cell.borrow_mut() = Some(parser);
        outcome
    })
}

fn new_parser() -> Result<Parser, String> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| format!("Go grammar unavailable: {e}"))?;
    Ok(parser)
}

fn count_with(parser: &mut Parser, content: &[u8]) -> ParseOutcome {
    let Some(tree) = parser.parse(content, None) else {
        return ParseOutcome::Malformed {
            diagnostic: "parser produced no syntax tree".to_string(),
        };
    };

    let root = tree.root_node();
    if root.has_error() {
        let diagnostic = first_error(root).map_or_else(
            || "syntax error".to_string(),
            |node| {
                let pos = node.start_position();
                let what = if node.is_missing() {
                    format!("missing {}", node.kind())
                } else {
                    "unexpected input".to_string()
                };
                format!("syntax error at {}:{}: {what}", pos.row + 1, pos.column + 1)
            },
        );
        return ParseOutcome::Malformed { diagnostic };
    }

    let mut cursor = root.walk();
    let functions = root
        .children(&mut cursor)
        .filter(|node| DECLARATION_KINDS.contains(&node.kind()))
        .filter(|node| node.child_by_field_name("name").is_some())
        .count();

    ParseOutcome::Parsed {
        functions: FunctionCount::new(functions),
    }
}

/// Depth-first search for the earliest ERROR or MISSING node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}
