//! Core adapter framework
//!
//! Defines the capability trait that all language adapters implement
//! and the registry callers use to pick an adapter per file.

use crate::Result;
use crate::context::{EnclosingContext, ValidityResult};
use crate::range::LineRange;
use std::path::Path;

/// Trait for language adapters
///
/// Every language exposes the same two operations:
/// 1. Locate the construct enclosing a line range
/// 2. Check whether a file parses without syntax errors
///
/// Both answers use normalized types; only the node vocabulary and the
/// diagnostic wording are grammar-specific. Neither operation fails:
/// parse trouble surfaces as a `None` context or an invalid
/// `ValidityResult`, never as an error the caller must unwrap.
pub trait LanguageAdapter: Send + Sync {
    /// Get the language name (for display and diagnostics)
    fn language_name(&self) -> &str;

    /// Get file extensions this adapter handles
    fn file_extensions(&self) -> &[&str];

    /// Check if this adapter can handle a file
    fn can_handle(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            self.file_extensions().contains(&ext)
        } else {
            false
        }
    }

    /// Parse `source` and return the largest construct fully containing
    /// `range`, or `None` when nothing does (including unparseable or
    /// empty input).
    fn locate_enclosing_context(&self, source: &str, range: &LineRange) -> Option<EnclosingContext>;

    /// Parse `source` and report whether the tree is free of error
    /// nodes. Recovered partial trees count as invalid.
    fn check_syntax(&self, source: &str) -> ValidityResult;
}

/// Registry of language adapters
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn LanguageAdapter>>,
}

impl AdapterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter
    pub fn register(&mut self, adapter: impl LanguageAdapter + 'static) {
        self.adapters.push(Box::new(adapter));
    }

    /// Find an adapter for a file
    pub fn find_adapter(&self, path: &Path) -> Option<&dyn LanguageAdapter> {
        self.adapters
            .iter()
            .find(|a| a.can_handle(path))
            .map(|a| a.as_ref())
    }

    /// Find an adapter by language name (case-insensitive)
    pub fn find_by_language(&self, name: &str) -> Option<&dyn LanguageAdapter> {
        self.adapters
            .iter()
            .find(|a| a.language_name().eq_ignore_ascii_case(name))
            .map(|a| a.as_ref())
    }

    /// Keep only adapters whose language appears in `names`
    pub fn retain_languages(&mut self, names: &[String]) {
        self.adapters
            .retain(|a| names.iter().any(|n| n.eq_ignore_ascii_case(a.language_name())));
    }

    /// Get all registered adapters
    pub fn adapters(&self) -> &[Box<dyn LanguageAdapter>] {
        &self.adapters
    }
}

/// Create a default registry with all built-in adapters
pub fn default_registry() -> Result<AdapterRegistry> {
    let mut registry = AdapterRegistry::new();
    registry.register(super::grammar::GrammarAdapter::python()?);
    registry.register(super::grammar::GrammarAdapter::javascript()?);
    registry.register(super::grammar::GrammarAdapter::rust()?);
    registry.register(super::grammar::GrammarAdapter::go()?);
    Ok(registry)
}
