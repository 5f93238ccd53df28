//! # sqlfront-core
//!
//! A front-end for SQL scripts: a lexer that recognizes multi-word keyword
//! phrases, a statement dispatcher paired with a context-sensitive Pratt
//! expression parser, and a syntax tree that renders back to SQL.
//!
//! ## Parsing a script
//!
//! [`Parser::parse`] returns one statement per call and `Ok(None)` at the
//! end of input. A syntax error is reported for the failing statement
//! only; the next call resumes after its terminator.
//!
//! ```rust
//! use sqlfront_core::{Parser, Statement};
//!
//! let mut parser = Parser::new("SELECT a FROM t LEFT OUTER JOIN u ON t.id = u.id; SELEC 1; COMMIT");
//!
//! let first = parser.parse().unwrap().unwrap();
//! assert_eq!(first.to_string(), "SELECT a FROM t LEFT OUTER JOIN u ON t.id = u.id");
//!
//! assert!(parser.parse().is_err());
//! assert_eq!(parser.parse().unwrap(), Some(Statement::Commit));
//! assert_eq!(parser.parse().unwrap(), None);
//! ```
//!
//! ## Dialects
//!
//! A [`Dialect`] supplies the keyword table and may register extra
//! statement grammars or expression handlers. [`AnsiDialect`] is the
//! default.

pub mod ast;
pub mod dialect;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::Statement;
pub use dialect::{AnsiDialect, Dialect};
pub use error::{Error, Result};
pub use lexer::{KeywordTable, Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser, ParserOptions};
