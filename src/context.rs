//! Normalized result types
//!
//! Adapters answer both capability operations with values of a fixed,
//! language-independent shape: an `EnclosingContext` describing the
//! winning node, or a `ValidityResult` describing whether a parse came
//! back clean. Only the node vocabulary and the diagnostic wording are
//! grammar-specific.

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Point};

/// A position in a source file: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Convert a Tree-sitter point (0-based row) to a position.
    pub fn from_point(point: Point) -> Self {
        Self {
            line: point.row as u32 + 1,
            column: point.column as u32,
        }
    }
}

/// The syntactic construct that encloses a queried line range.
///
/// `kind` is the grammar's raw node label (e.g. `function_definition`
/// for Python, `function_item` for Rust); no cross-language
/// normalization is applied, so callers must tolerate per-grammar
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnclosingContext {
    pub kind: String,
    pub start: Position,
    pub end: Position,
}

impl EnclosingContext {
    /// Build the normalized descriptor from a concrete Tree-sitter node.
    pub fn from_node(node: &Node) -> Self {
        Self {
            kind: node.kind().to_string(),
            start: Position::from_point(node.start_position()),
            end: Position::from_point(node.end_position()),
        }
    }
}

impl std::fmt::Display for EnclosingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}:{} - {}:{})",
            self.kind, self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Outcome of a syntax check. `error` is empty exactly when `valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityResult {
    pub valid: bool,
    pub error: String,
}

impl ValidityResult {
    /// A passing result with an empty diagnostic.
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: String::new(),
        }
    }

    /// A failing result carrying a diagnostic message.
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: error.into(),
        }
    }
}
