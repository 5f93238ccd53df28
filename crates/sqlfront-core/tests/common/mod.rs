#![allow(dead_code)]

use sqlfront_core::ast::Select;
use sqlfront_core::{Error, ParseError, Parser, Statement};

pub fn parse(sql: &str) -> Statement {
    match Parser::new(sql).parse() {
        Ok(Some(statement)) => statement,
        Ok(None) => panic!("No statement in: {sql}"),
        Err(e) => panic!("Failed to parse: {sql}\nError: {e:?}"),
    }
}

pub fn parse_all(sql: &str) -> Vec<Statement> {
    Parser::new(sql)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    match Parser::new(sql).parse() {
        Err(Error::Syntax(err)) => err,
        other => panic!("Expected parse error for: {sql}, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> Select {
    match parse(sql) {
        Statement::Select(s) => *s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() re-parses to the same tree and renders to
/// the same string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the tree.\n  Input:    {sql}\n  Rendered: {rendered1}"
    );
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
