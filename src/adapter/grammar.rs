//! Tree-sitter grammar adapters
//!
//! One adapter per supported language, all sharing the same wiring: a
//! grammar loaded into an owned parser, the shared locator for context
//! queries, and the uniform validity policy. Adding a language means
//! adding a constructor, not new logic.

use super::framework::LanguageAdapter;
use crate::context::{EnclosingContext, ValidityResult};
use crate::locator::find_enclosing_node;
use crate::range::LineRange;
use crate::{Error, Result};
use std::sync::{Mutex, PoisonError};
use tree_sitter::{Language, Parser, Tree};

/// A language adapter backed by a Tree-sitter grammar.
///
/// Owns a single parser instance. Tree-sitter parsers are not
/// reentrant, so calls are serialized through a mutex; callers that
/// want parallel parsing instantiate one adapter per worker.
pub struct GrammarAdapter {
    language_name: &'static str,
    extensions: &'static [&'static str],
    parser: Mutex<Parser>,
}

impl GrammarAdapter {
    fn new(
        language: Language,
        language_name: &'static str,
        extensions: &'static [&'static str],
    ) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&language).map_err(|e| {
            Error::Grammar(format!("failed to load {} grammar: {}", language_name, e))
        })?;

        Ok(Self {
            language_name,
            extensions,
            parser: Mutex::new(parser),
        })
    }

    /// Create a Python adapter
    pub fn python() -> Result<Self> {
        Self::new(tree_sitter_python::LANGUAGE.into(), "Python", &["py", "pyi"])
    }

    /// Create a JavaScript adapter
    pub fn javascript() -> Result<Self> {
        Self::new(
            tree_sitter_javascript::LANGUAGE.into(),
            "JavaScript",
            &["js", "jsx", "mjs", "cjs"],
        )
    }

    /// Create a Rust adapter
    pub fn rust() -> Result<Self> {
        Self::new(tree_sitter_rust::LANGUAGE.into(), "Rust", &["rs"])
    }

    /// Create a Go adapter
    pub fn go() -> Result<Self> {
        Self::new(tree_sitter_go::LANGUAGE.into(), "Go", &["go"])
    }

    /// Parse source with this adapter's grammar. `None` means the
    /// parser gave up without producing a tree; syntax errors still
    /// yield a recovered tree.
    fn parse(&self, source: &str) -> Option<Tree> {
        let mut parser = self.parser.lock().unwrap_or_else(PoisonError::into_inner);
        parser.parse(source, None)
    }
}

impl LanguageAdapter for GrammarAdapter {
    fn language_name(&self) -> &str {
        self.language_name
    }

    fn file_extensions(&self) -> &[&str] {
        self.extensions
    }

    fn locate_enclosing_context(
        &self,
        source: &str,
        range: &LineRange,
    ) -> Option<EnclosingContext> {
        let tree = match self.parse(source) {
            Some(tree) => tree,
            None => {
                tracing::warn!(
                    "{} parser produced no tree, no context for lines {}",
                    self.language_name,
                    range
                );
                return None;
            }
        };

        let found = find_enclosing_node(tree.root_node(), range)
            .map(|node| EnclosingContext::from_node(&node));
        tracing::debug!(
            "{} lines {}: {}",
            self.language_name,
            range,
            found
                .as_ref()
                .map(|c| c.kind.as_str())
                .unwrap_or("no enclosing context")
        );
        found
    }

    fn check_syntax(&self, source: &str) -> ValidityResult {
        let tree = match self.parse(source) {
            Some(tree) => tree,
            None => {
                return ValidityResult::invalid(format!(
                    "{} parse failure: parser produced no tree",
                    self.language_name
                ));
            }
        };

        if tree.root_node().has_error() {
            ValidityResult::invalid(format!("Syntax error in {} code", self.language_name))
        } else {
            ValidityResult::valid()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_adapters() -> Vec<GrammarAdapter> {
        vec![
            GrammarAdapter::python().unwrap(),
            GrammarAdapter::javascript().unwrap(),
            GrammarAdapter::rust().unwrap(),
            GrammarAdapter::go().unwrap(),
        ]
    }

    const PYTHON_FUNCTION: &str = "\
def validate(token):
    if token is None:
        return False
    if len(token) < 8:
        return False
    checks = [
        token.isalnum(),
        not token.isspace(),
    ]
    return all(checks)
";

    #[test]
    fn test_python_locate_inner_range() {
        let adapter = GrammarAdapter::python().unwrap();
        let range = LineRange::new(3, 5).unwrap();

        let ctx = adapter
            .locate_enclosing_context(PYTHON_FUNCTION, &range)
            .expect("should find a context");

        // The module wrapper spans every row the function does plus the
        // trailing newline, so it is the largest containing node.
        assert_eq!(ctx.kind, "module");
        assert_eq!(ctx.start.line, 1);
        assert!(ctx.end.line >= 10);
    }

    #[test]
    fn test_python_locate_is_idempotent() {
        let adapter = GrammarAdapter::python().unwrap();
        let range = LineRange::new(2, 6).unwrap();

        let first = adapter.locate_enclosing_context(PYTHON_FUNCTION, &range);
        let second = adapter.locate_enclosing_context(PYTHON_FUNCTION, &range);
        assert_eq!(first, second);
    }

    #[test]
    fn test_python_out_of_range_is_none() {
        let adapter = GrammarAdapter::python().unwrap();
        let range = LineRange::new(100, 200).unwrap();

        assert!(
            adapter
                .locate_enclosing_context(PYTHON_FUNCTION, &range)
                .is_none()
        );
    }

    #[test]
    fn test_python_check_syntax_valid() {
        let adapter = GrammarAdapter::python().unwrap();
        let result = adapter.check_syntax(PYTHON_FUNCTION);

        assert!(result.valid);
        assert!(result.error.is_empty());
    }

    #[test]
    fn test_python_truncated_file_is_invalid() {
        let adapter = GrammarAdapter::python().unwrap();
        // Same file with the list left unterminated.
        let truncated = "def validate(token):\n    checks = [\n        token.isalnum(),\n";

        let result = adapter.check_syntax(truncated);
        assert!(!result.valid);
        assert_eq!(result.error, "Syntax error in Python code");
    }

    #[test]
    fn test_malformed_source_still_locates() {
        // Error recovery keeps the tree usable; error nodes take part
        // in the search like any other node.
        let adapter = GrammarAdapter::python().unwrap();
        let broken = "def broken(:\n    return 1\nprint(done\n";
        let range = LineRange::new(1, 2).unwrap();

        assert!(adapter.locate_enclosing_context(broken, &range).is_some());
    }

    #[test]
    fn test_javascript_locate_and_check() {
        let adapter = GrammarAdapter::javascript().unwrap();
        let source = "\
function greet(name) {
  const msg = `Hello ${name}`;
  return msg;
}
";
        let range = LineRange::new(2, 3).unwrap();

        let ctx = adapter
            .locate_enclosing_context(source, &range)
            .expect("should find a context");
        assert_eq!(ctx.kind, "program");

        assert!(adapter.check_syntax(source).valid);
        let result = adapter.check_syntax("function greet(name) {\n  return name;\n");
        assert!(!result.valid);
        assert_eq!(result.error, "Syntax error in JavaScript code");
    }

    #[test]
    fn test_rust_locate_and_check() {
        let adapter = GrammarAdapter::rust().unwrap();
        let source = "\
fn add(a: i32, b: i32) -> i32 {
    let sum = a + b;
    sum
}
";
        let range = LineRange::new(2, 2).unwrap();

        let ctx = adapter
            .locate_enclosing_context(source, &range)
            .expect("should find a context");
        assert_eq!(ctx.kind, "source_file");

        assert!(adapter.check_syntax(source).valid);
        assert!(!adapter.check_syntax("fn add(a: i32 {\n").valid);
    }

    #[test]
    fn test_go_locate_and_check() {
        let adapter = GrammarAdapter::go().unwrap();
        let source = "\
package main

func main() {
	println(\"hello\")
}
";
        let range = LineRange::new(3, 5).unwrap();

        let ctx = adapter
            .locate_enclosing_context(source, &range)
            .expect("should find a context");
        assert_eq!(ctx.kind, "source_file");

        assert!(adapter.check_syntax(source).valid);
        let result = adapter.check_syntax("package main\n\nfunc main() {\n");
        assert!(!result.valid);
        assert_eq!(result.error, "Syntax error in Go code");
    }

    #[test]
    fn test_empty_source_per_grammar() {
        // Verified per grammar rather than assumed: all four bundled
        // grammars parse the empty string without error nodes, and the
        // locator finds nothing to attribute.
        let range = LineRange::new(1, 1).unwrap();

        for adapter in all_adapters() {
            let check = adapter.check_syntax("");
            assert!(
                check.valid,
                "{} should accept an empty file",
                adapter.language_name()
            );

            assert!(
                adapter.locate_enclosing_context("", &range).is_none(),
                "{} should find no context in an empty file",
                adapter.language_name()
            );
        }
    }

    #[test]
    fn test_diagnostic_names_language() {
        for adapter in all_adapters() {
            let result = adapter.check_syntax("] } ) unbalanced ( { [");
            if !result.valid {
                assert!(
                    result.error.contains(adapter.language_name()),
                    "diagnostic should name the language: {}",
                    result.error
                );
            }
        }
    }
}
