//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer that turns a [`Source`] buffer
//! into a stream of tokens. Keywords are matched against a
//! [`KeywordTable`], so multi-word phrases such as `LEFT OUTER JOIN` come
//! out as a single keyword token.

mod keywords;
mod position;
mod source;
mod token;
mod tokenizer;

pub use keywords::{KeywordTable, Lookup};
pub use position::Position;
pub use source::{Checkpoint, Source};
pub use token::{Symbol, Token, TokenKind};
pub use tokenizer::Lexer;
