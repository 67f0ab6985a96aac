//! Language Adapter Framework
//!
//! Each language contributes a Tree-sitter grammar wired behind one
//! capability trait, so callers never see language-specific logic.
//! Picking the adapter for a file (by extension) belongs to the caller;
//! the registry only supplies the lookup.

pub mod framework;
pub mod grammar;

pub use framework::{AdapterRegistry, LanguageAdapter, default_registry};
pub use grammar::GrammarAdapter;
