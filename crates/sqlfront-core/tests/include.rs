//! Tests for `@include` directives over real files.

use std::fs;
use std::path::Path;

use sqlfront_core::{AnsiDialect, Error, Parser, ParserOptions, Statement};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, sql: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, sql).unwrap();
}

fn open(dir: &TempDir, name: &str) -> Parser {
    Parser::from_path(dir.path().join(name), &AnsiDialect).unwrap()
}

#[test]
fn nested_includes_resolve_against_the_including_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "main.sql",
        "SELECT 1;\n@include 'sub/child.sql';\nCOMMIT;\n",
    );
    write(
        dir.path(),
        "sub/child.sql",
        "SAVEPOINT a;\n@include 'grand.sql';\n",
    );
    write(dir.path(), "sub/grand.sql", "ROLLBACK;\n");

    let statements: Vec<Statement> = open(&dir, "main.sql").map(Result::unwrap).collect();
    assert_eq!(statements.len(), 4);
    assert!(matches!(statements[0], Statement::Select(_)));
    assert_eq!(statements[1], Statement::Savepoint("a".into()));
    assert_eq!(statements[2], Statement::Rollback);
    assert_eq!(statements[3], Statement::Commit);
}

#[test]
fn syntax_errors_inside_an_included_file_recover() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.sql", "@include 'bad.sql';\nCOMMIT;");
    write(dir.path(), "bad.sql", "SELEC 1;\nROLLBACK;");

    let mut parser = open(&dir, "main.sql");
    let err = parser.parse().unwrap_err();
    assert_eq!(err.as_syntax().unwrap().statement.as_deref(), Some("SELEC 1"));
    assert_eq!(parser.parse().unwrap(), Some(Statement::Rollback));
    assert_eq!(parser.parse().unwrap(), Some(Statement::Commit));
    assert!(parser.parse().unwrap().is_none());
}

#[test]
fn include_cycle_is_a_hard_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.sql", "SELECT 1;\n@include 'b.sql';\nCOMMIT;");
    write(dir.path(), "b.sql", "ROLLBACK;\n@include 'a.sql';");

    let results: Vec<_> = open(&dir, "a.sql").collect();
    assert_eq!(results.len(), 3);
    assert!(matches!(results[0], Ok(Statement::Select(_))));
    assert!(matches!(results[1], Ok(Statement::Rollback)));
    let Err(Error::IncludeCycle { path }) = &results[2] else {
        panic!("expected an include cycle, got {:?}", results[2]);
    };
    assert_eq!(path, &dir.path().join("a.sql").canonicalize().unwrap());
}

#[test]
fn self_include_is_a_cycle() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "self.sql", "@include 'self.sql';");

    let err = open(&dir, "self.sql").parse().unwrap_err();
    assert!(matches!(err, Error::IncludeCycle { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn include_depth_is_limited() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.sql", "@include 'one.sql';");
    write(dir.path(), "one.sql", "COMMIT;\n@include 'two.sql';");
    write(dir.path(), "two.sql", "ROLLBACK;");

    let options = ParserOptions {
        max_include_depth: 1,
        ..ParserOptions::default()
    };
    let mut parser = open(&dir, "main.sql").with_options(options);
    assert_eq!(parser.parse().unwrap(), Some(Statement::Commit));
    let err = parser.parse().unwrap_err();
    assert!(matches!(err, Error::IncludeDepth { limit: 1, .. }));
}

#[test]
fn missing_include() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "main.sql", "@include 'nowhere.sql';\nCOMMIT;");

    let mut parser = open(&dir, "main.sql");
    let err = parser.next().unwrap().unwrap_err();
    assert!(matches!(err, Error::Include { ref path, .. } if path.ends_with("nowhere.sql")));
    assert!(err.to_string().starts_with("Cannot include"));
    assert!(parser.next().is_none());
}

#[test]
fn missing_root_file() {
    let dir = TempDir::new().unwrap();
    let err = Parser::from_path(dir.path().join("absent.sql"), &AnsiDialect)
        .err()
        .unwrap();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn reader_input() {
    let parser = Parser::from_reader("\u{feff}COMMIT; ROLLBACK".as_bytes(), &AnsiDialect).unwrap();
    let statements: Vec<Statement> = parser.map(Result::unwrap).collect();
    assert_eq!(statements, vec![Statement::Commit, Statement::Rollback]);
}

#[test]
fn comments_after_an_include_stay_with_the_including_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "main.sql",
        "-- setup\n@include 'one.sql';\n-- finish up\nCOMMIT;\n",
    );
    write(dir.path(), "one.sql", "-- inner\nROLLBACK;\n");

    let statements: Vec<Statement> = open(&dir, "main.sql").map(Result::unwrap).collect();
    assert_eq!(
        statements,
        vec![
            Statement::Commented {
                leading: vec!["-- inner".into()],
                trailing: None,
                statement: Box::new(Statement::Rollback),
            },
            Statement::Commented {
                leading: vec!["-- finish up".into()],
                trailing: None,
                statement: Box::new(Statement::Commit),
            },
        ]
    );
}
