//! # Revscope - Enclosing-Context Core
//!
//! Language-agnostic attribution of line ranges to syntactic constructs.
//!
//! Revscope provides:
//! - An enclosing-context locator over Tree-sitter syntax trees
//! - Pluggable language adapters behind a single capability trait
//! - Syntax validity checking with a uniform diagnostic policy
//! - A normalized, serializable result representation
//!
//! Given source text and a 1-based inclusive line range (typically a
//! changed hunk from a diff), an adapter returns the construct that
//! contains the range, so review tooling can comment on functions and
//! classes instead of raw line spans.

pub mod adapter;
pub mod config;
pub mod context;
pub mod locator;
pub mod range;

// Re-exports for convenient access
pub use adapter::{AdapterRegistry, GrammarAdapter, LanguageAdapter, default_registry};
pub use context::{EnclosingContext, Position, ValidityResult};
pub use range::LineRange;

/// Result type alias for Revscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Revscope operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Invalid line range: {0}")]
    InvalidRange(String),
}
