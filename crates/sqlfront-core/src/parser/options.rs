//! Parser configuration.

use serde::Deserialize;

/// Options controlling a [`Parser`](super::Parser).
///
/// Deserializable so tools can load it from their own configuration files;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Maximum nesting of `@include` directives.
    pub max_include_depth: usize,
    /// Maximum nesting of statements and expressions, e.g. parentheses.
    pub max_nesting_depth: usize,
    /// Whether syntax errors carry the full statement text.
    pub capture_statement_text: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_include_depth: 16,
            max_nesting_depth: 128,
            capture_statement_text: true,
        }
    }
}
