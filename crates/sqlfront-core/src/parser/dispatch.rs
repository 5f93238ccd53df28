//! The default statement table: leading keyword to grammar.

use std::collections::HashMap;

use super::parser::StatementHandler;
use super::{ddl, dml, procedural, query, transaction};

/// Returns the statement grammars every parser starts with.
///
/// Keys are the upper-case keyword phrases produced by the lexer; a
/// dialect may add or remove entries through
/// [`Parser::register_statement`](super::Parser::register_statement).
pub(super) fn standard_statements() -> HashMap<String, StatementHandler> {
    let entries: [(&str, StatementHandler); 35] = [
        ("SELECT", query::select_statement),
        ("WITH", query::with_statement),
        ("VALUES", query::values_statement),
        ("INSERT INTO", dml::insert_statement),
        ("UPDATE", dml::update_statement),
        ("DELETE FROM", dml::delete_statement),
        ("MERGE INTO", dml::merge_statement),
        ("TRUNCATE", dml::truncate_statement),
        ("TRUNCATE TABLE", dml::truncate_statement),
        ("CREATE TABLE", ddl::create_table_statement),
        ("CREATE TEMPORARY TABLE", ddl::create_table_statement),
        ("CREATE VIEW", ddl::create_view_statement),
        ("CREATE OR REPLACE VIEW", ddl::create_view_statement),
        ("CREATE PROCEDURE", ddl::create_procedure_statement),
        ("CREATE OR REPLACE PROCEDURE", ddl::create_procedure_statement),
        ("ALTER TABLE", ddl::alter_table_statement),
        ("DROP TABLE", ddl::drop_statement),
        ("DROP VIEW", ddl::drop_statement),
        ("DECLARE", procedural::declare_statement),
        ("SET", procedural::set_statement),
        ("IF", procedural::if_statement),
        ("WHILE", procedural::while_statement),
        ("RETURN", procedural::return_statement),
        ("BEGIN", procedural::begin_statement),
        ("BEGIN TRANSACTION", transaction::start_transaction_statement),
        ("START TRANSACTION", transaction::start_transaction_statement),
        ("SET TRANSACTION", transaction::set_transaction_statement),
        ("COMMIT", transaction::commit_statement),
        ("ROLLBACK", transaction::rollback_statement),
        ("ROLLBACK TO", transaction::rollback_to_statement),
        ("ROLLBACK TO SAVEPOINT", transaction::rollback_to_statement),
        ("SAVEPOINT", transaction::savepoint_statement),
        ("RELEASE SAVEPOINT", transaction::release_savepoint_statement),
        ("GRANT", transaction::grant_statement),
        ("REVOKE", transaction::revoke_statement),
    ];
    entries
        .into_iter()
        .map(|(keyword, handler)| (keyword.to_string(), handler))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{AnsiDialect, Dialect};

    #[test]
    fn test_every_statement_keyword_is_a_keyword() {
        let keywords = AnsiDialect.keywords();
        for keyword in standard_statements().keys() {
            assert!(
                keywords.contains(keyword),
                "{keyword} is not in the keyword table"
            );
        }
    }
}
