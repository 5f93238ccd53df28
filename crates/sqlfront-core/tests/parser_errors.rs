//! Tests for syntax errors, recovery and comment attachment.

mod common;
use common::*;

use sqlfront_core::lexer::Position;
use sqlfront_core::{Error, Parser, ParserOptions, Statement, TokenKind};

// ===================================================================
// Recovery
// ===================================================================

#[test]
fn second_statement_survives_first_failure() {
    let mut parser = Parser::new("SELECT a FROM WHERE; SELECT b FROM t;");
    let err = parser.parse().unwrap_err();
    assert!(err.is_recoverable());
    let second = parser.parse().unwrap().unwrap();
    assert_eq!(second.to_string(), "SELECT b FROM t");
    assert!(parser.parse().unwrap().is_none());
}

#[test]
fn iterator_yields_errors_in_place() {
    let results: Vec<_> = Parser::new("COMMIT; SELEC 1; ROLLBACK; INSERT t; SAVEPOINT s").collect();
    assert_eq!(results.len(), 5);
    assert!(matches!(results[0], Ok(Statement::Commit)));
    assert!(matches!(results[1], Err(Error::Syntax(_))));
    assert!(matches!(results[2], Ok(Statement::Rollback)));
    assert!(matches!(results[3], Err(Error::Syntax(_))));
    assert!(matches!(results[4], Ok(Statement::Savepoint(_))));
}

#[test]
fn failure_at_end_of_input() {
    let mut parser = Parser::new("SELECT 1; SELECT a +");
    assert!(parser.parse().unwrap().is_some());
    assert!(parser.parse().is_err());
    assert!(parser.parse().unwrap().is_none());
}

// ===================================================================
// Error details
// ===================================================================

#[test]
fn unterminated_string_is_a_syntax_error() {
    let err = parse_err("SELECT 'abc");
    assert_eq!(err.token.kind, TokenKind::Invalid);
    assert_eq!(err.position(), Position::new(1, 8, 7));
}

#[test]
fn context_names_the_failed_rule() {
    for (sql, context) in [
        ("SELECT a FROM WHERE", "from"),
        ("SELECT CASE WHEN a 1 END", "case"),
        ("SELECT (1 + 2 FROM t", "group"),
        ("SELECT CAST(a INT)", "cast"),
        ("SELECT * FROM a JOIN b USING id", "join"),
        ("FROM t", "statement"),
        ("SELECT 1 2", "statement"),
    ] {
        assert_eq!(parse_err(sql).context, context, "{sql}");
    }
}

#[test]
fn error_carries_statement_and_caret() {
    let mut parser = Parser::new("SELECT 1;\nSELECT a FROM WHERE;\n");
    parser.parse().unwrap();
    let err = parser.parse().unwrap_err();
    let err = err.as_syntax().unwrap();
    assert_eq!(err.token.literal, "WHERE");
    assert_eq!(err.statement.as_deref(), Some("SELECT a FROM WHERE"));
    assert_eq!(err.statement_start, Position::new(2, 1, 10));
    assert_eq!(
        err.snippet().unwrap(),
        "2 | SELECT a FROM WHERE\n  |               ^"
    );
}

#[test]
fn statement_text_can_be_disabled() {
    let options = ParserOptions {
        capture_statement_text: false,
        ..ParserOptions::default()
    };
    let err = Parser::new("SELECT FROM")
        .with_options(options)
        .parse()
        .unwrap_err();
    let err = err.as_syntax().unwrap();
    assert!(err.statement.is_none());
    assert!(err.snippet().is_none());
}

#[test]
fn error_display_names_context_and_position() {
    let err = parse_err("SELECT a FROM WHERE");
    assert_eq!(
        err.to_string(),
        "from: expected table name or subquery, found keyword WHERE at line 1, column 15"
    );
}

#[test]
fn unknown_directive() {
    let mut parser = Parser::new("@pragma x; COMMIT");
    let err = parser.parse().unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(err.as_syntax().unwrap().context, "macro");
    assert_eq!(parser.parse().unwrap(), Some(Statement::Commit));
}

#[test]
fn include_needs_a_quoted_path() {
    assert_eq!(parse_err("@include nothing;").context, "include");
}

// ===================================================================
// Comments
// ===================================================================

#[test]
fn leading_and_trailing_comments_attach() {
    let statements = parse_all(
        "-- first\n\
         /* block */\n\
         COMMIT; -- same line\n\
         -- next line\n\
         ROLLBACK;",
    );
    assert_eq!(
        statements[0],
        Statement::Commented {
            leading: vec!["-- first".into(), "/* block */".into()],
            trailing: Some("-- same line".into()),
            statement: Box::new(Statement::Commit),
        }
    );
    assert_eq!(
        statements[1],
        Statement::Commented {
            leading: vec!["-- next line".into()],
            trailing: None,
            statement: Box::new(Statement::Rollback),
        }
    );
}

#[test]
fn comments_inside_a_statement_are_dropped() {
    assert_eq!(
        parse("SELECT /* one */ 1").to_string(),
        "SELECT 1"
    );
}

#[test]
fn comments_of_a_failed_statement_do_not_leak() {
    let mut parser = Parser::new("SELECT /* lost */ FROM;\nCOMMIT;");
    assert!(parser.parse().is_err());
    assert_eq!(parser.parse().unwrap(), Some(Statement::Commit));
}

#[test]
fn commented_statements_round_trip() {
    for sql in [
        "COMMIT; -- after",
        "-- first\n/* block */\nSELECT a FROM t; -- same line",
        "-- only leading\nROLLBACK",
    ] {
        round_trip(sql);
    }
}

// ===================================================================
// Nesting
// ===================================================================

#[test]
fn deep_nesting_is_a_recoverable_error() {
    let sql = format!("SELECT {}1{}; COMMIT", "(".repeat(500), ")".repeat(500));
    let mut parser = Parser::new(&sql);
    let err = parser.parse().unwrap_err();
    assert_eq!(err.as_syntax().unwrap().context, "nesting");
    assert_eq!(parser.parse().unwrap(), Some(Statement::Commit));
}

#[test]
fn nesting_limit_is_configurable() {
    let options = ParserOptions {
        max_nesting_depth: 4,
        ..ParserOptions::default()
    };
    let shallow = Parser::new("SELECT ((1))")
        .with_options(options.clone())
        .parse();
    assert!(shallow.is_ok());
    let err = Parser::new("SELECT (((1)))")
        .with_options(options)
        .parse()
        .unwrap_err();
    assert_eq!(err.as_syntax().unwrap().context, "nesting");
}

#[test]
fn moderate_nesting_parses() {
    let sql = format!("SELECT {}1{}", "(".repeat(50), ")".repeat(50));
    assert!(matches!(parse(&sql), Statement::Select(_)));
}
