//! SQL Parser
//!
//! A hand-written statement dispatcher with Pratt expression parsing.
//! Statement grammars are looked up by their leading keyword phrase;
//! expression handlers live in a [`Registry`] whose active context decides
//! which operators are legal where.

mod ddl;
mod dispatch;
mod dml;
mod error;
mod expr;
mod options;
#[allow(clippy::module_inception)]
mod parser;
pub mod pratt;
mod procedural;
mod query;
mod registry;
mod transaction;

pub use dml::parse_assignment;
pub use error::ParseError;
pub use expr::{parse_type_name, standard_registry};
pub use options::ParserOptions;
pub use parser::{Parser, StatementHandler};
pub use query::{
    is_query_start, parse_order_list, parse_query, parse_table_list, parse_table_reference,
    parse_window,
};
pub use registry::{Context, InfixHandler, PrefixHandler, Registry};
