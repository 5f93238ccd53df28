//! SQL Dialect support.
//!
//! A dialect decides which words are keywords and may adjust the parser's
//! handler tables before the first statement is read. Different databases
//! accept slightly different syntax; a dialect expresses those differences
//! as extra keyword phrases plus registered or removed handlers.

mod ansi;

pub use ansi::{AnsiDialect, ANSI_KEYWORDS};

use crate::lexer::KeywordTable;
use crate::parser::Parser;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the keyword phrases the lexer recognizes.
    ///
    /// The table must contain every phrase the registered handlers look
    /// for; extending dialects usually start from
    /// [`AnsiDialect::keywords`] and [`KeywordTable::union`] their own.
    fn keywords(&self) -> KeywordTable;

    /// Adjusts a freshly built parser: register statement grammars,
    /// expression handlers or disable operators.
    fn configure(&self, _parser: &mut Parser) {}
}
