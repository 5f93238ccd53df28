//! Data manipulation grammar: `INSERT`, `UPDATE`, `DELETE`, `MERGE` and
//! `TRUNCATE`.

use super::query::{self, parse_table_list, parse_table_reference};
use super::registry::Context;
use super::{ParseError, Parser};
use crate::ast::{
    Assignment, Delete, Insert, InsertSource, Merge, MergeAction, MergeClause, Statement, Update,
    Upsert, UpsertAction,
};
use crate::lexer::TokenKind;

type Result<T> = std::result::Result<T, ParseError>;

/// Parses `INSERT INTO table [(columns)] source [ON CONFLICT ...] [RETURNING ...]`.
pub(super) fn insert_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("INSERT INTO", "insert")?;
    let table = p.parse_name("insert")?;

    let columns = if p.check(TokenKind::LeftParen) && p.peek().is_identifier() {
        p.parse_column_list("insert")?
    } else {
        Vec::new()
    };

    let source = if p.consume_keyword("DEFAULT VALUES") {
        InsertSource::DefaultValues
    } else if query::is_query_start(p.current()) {
        InsertSource::Query(Box::new(query::parse_query(p)?))
    } else {
        return Err(p.unexpected("insert", "VALUES, SELECT or DEFAULT VALUES"));
    };

    let upsert = if p.consume_keyword("ON CONFLICT") {
        Some(parse_upsert(p)?)
    } else {
        None
    };

    let returning = parse_returning(p)?;

    Ok(Statement::Insert(Box::new(Insert {
        table,
        columns,
        source,
        upsert,
        returning,
    })))
}

fn parse_upsert(p: &mut Parser) -> Result<Upsert> {
    let target = if p.check(TokenKind::LeftParen) {
        p.parse_column_list("upsert")?
    } else {
        Vec::new()
    };
    p.expect_keyword("DO", "upsert")?;
    let action = if p.consume_keyword("NOTHING") {
        UpsertAction::Nothing
    } else {
        p.expect_keyword("UPDATE", "upsert")?;
        p.expect_keyword("SET", "upsert")?;
        let assignments = parse_assignments(p)?;
        let where_clause = parse_where(p)?;
        UpsertAction::Update {
            assignments,
            where_clause,
        }
    };
    Ok(Upsert { target, action })
}

/// Parses `RETURNING *` or `RETURNING expr, ...`.
fn parse_returning(p: &mut Parser) -> Result<Vec<Statement>> {
    if !p.consume_keyword("RETURNING") {
        return Ok(Vec::new());
    }
    if p.check(TokenKind::Star) {
        p.advance();
        if !p.current().is_terminator() {
            return Err(p.unexpected("returning", "end of statement after RETURNING *"));
        }
        return Ok(vec![Statement::name(["*"])]);
    }
    p.parse_expression_list(Context::Expression)
}

fn parse_where(p: &mut Parser) -> Result<Option<Statement>> {
    if p.consume_keyword("WHERE") {
        Ok(Some(p.parse_expression_in(Context::Predicate)?))
    } else {
        Ok(None)
    }
}

/// Parses one `target op value` assignment.
///
/// The target is a (qualified) column or a `@variable`; `op` is `=` or a
/// compound operator such as `+=`.
///
/// # Errors
///
/// Returns a `ParseError` if the target, operator or value is missing.
pub fn parse_assignment(p: &mut Parser) -> Result<Assignment> {
    let target = if p.check(TokenKind::Macro) {
        Statement::name([p.advance().literal])
    } else {
        p.parse_name("assignment")?
    };
    let kind = p.current().kind;
    let op = match kind {
        TokenKind::Eq
        | TokenKind::PlusEq
        | TokenKind::MinusEq
        | TokenKind::SlashEq
        | TokenKind::PercentEq => p.advance().literal,
        _ => return Err(p.unexpected("assignment", "'=' or a compound assignment")),
    };
    let value = p.parse_expression_in(Context::Predicate)?;
    Ok(Assignment { target, op, value })
}

fn parse_assignments(p: &mut Parser) -> Result<Vec<Assignment>> {
    let mut assignments = vec![parse_assignment(p)?];
    while p.consume(TokenKind::Comma) {
        assignments.push(parse_assignment(p)?);
    }
    Ok(assignments)
}

/// Parses `UPDATE table SET ... [FROM ...] [WHERE ...] [RETURNING ...]`.
pub(super) fn update_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("UPDATE", "update")?;
    let table = parse_table_reference(p)?;
    p.expect_keyword("SET", "update")?;
    let assignments = parse_assignments(p)?;
    let from = if p.consume_keyword("FROM") {
        parse_table_list(p)?
    } else {
        Vec::new()
    };
    let where_clause = parse_where(p)?;
    let returning = parse_returning(p)?;

    Ok(Statement::Update(Box::new(Update {
        table,
        assignments,
        from,
        where_clause,
        returning,
    })))
}

/// Parses `DELETE FROM table [USING ...] [WHERE ...] [RETURNING ...]`.
pub(super) fn delete_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("DELETE FROM", "delete")?;
    let table = parse_table_reference(p)?;
    let using = if p.consume_keyword("USING") {
        parse_table_list(p)?
    } else {
        Vec::new()
    };
    let where_clause = parse_where(p)?;
    let returning = parse_returning(p)?;

    Ok(Statement::Delete(Box::new(Delete {
        table,
        using,
        where_clause,
        returning,
    })))
}

/// Parses `MERGE INTO target USING source ON condition WHEN ...`.
pub(super) fn merge_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("MERGE INTO", "merge")?;
    let target = parse_table_reference(p)?;
    p.expect_keyword("USING", "merge")?;
    let source = parse_table_reference(p)?;
    p.expect_keyword("ON", "merge")?;
    let condition = p.parse_expression_in(Context::Predicate)?;

    let mut clauses = Vec::new();
    while p.check_any_keyword(&["WHEN MATCHED", "WHEN NOT MATCHED"]) {
        let matched = p.advance().literal == "WHEN MATCHED";
        let condition = if p.consume_keyword("AND") {
            Some(p.parse_expression_in(Context::Predicate)?)
        } else {
            None
        };
        p.expect_keyword("THEN", "merge")?;
        let action = parse_merge_action(p)?;
        clauses.push(MergeClause {
            matched,
            condition,
            action,
        });
    }
    if clauses.is_empty() {
        return Err(p.unexpected("merge", "WHEN MATCHED or WHEN NOT MATCHED"));
    }

    Ok(Statement::Merge(Box::new(Merge {
        target,
        source,
        condition,
        clauses,
    })))
}

fn parse_merge_action(p: &mut Parser) -> Result<MergeAction> {
    if p.consume_keyword("UPDATE") {
        p.expect_keyword("SET", "merge")?;
        return Ok(MergeAction::Update(parse_assignments(p)?));
    }
    if p.consume_keyword("DELETE") {
        return Ok(MergeAction::Delete);
    }
    if p.consume_keyword("INSERT") {
        let columns = if p.check(TokenKind::LeftParen) {
            p.parse_column_list("merge")?
        } else {
            Vec::new()
        };
        p.expect_keyword("VALUES", "merge")?;
        p.expect(TokenKind::LeftParen, "merge")?;
        let values = p.parse_expression_list(Context::Predicate)?;
        p.expect(TokenKind::RightParen, "merge")?;
        return Ok(MergeAction::Insert { columns, values });
    }
    if p.consume_keyword("DO") {
        p.expect_keyword("NOTHING", "merge")?;
        return Ok(MergeAction::DoNothing);
    }
    Err(p.unexpected("merge", "UPDATE, DELETE, INSERT or DO NOTHING"))
}

/// Parses `TRUNCATE [TABLE] name, ...`.
pub(super) fn truncate_statement(p: &mut Parser) -> Result<Statement> {
    p.advance();
    let mut tables = vec![p.parse_name("truncate")?];
    while p.consume(TokenKind::Comma) {
        tables.push(p.parse_name("truncate")?);
    }
    Ok(Statement::Truncate(tables))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sql: &str) -> Statement {
        Parser::new(sql).parse().unwrap().unwrap()
    }

    fn parse_err(sql: &str) -> ParseError {
        match Parser::new(sql).parse() {
            Err(crate::Error::Syntax(err)) => err,
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_default_values() {
        let Statement::Insert(insert) = parse("INSERT INTO t DEFAULT VALUES") else {
            panic!("expected INSERT");
        };
        assert_eq!(insert.source, InsertSource::DefaultValues);
    }

    #[test]
    fn test_insert_upsert_do_update() {
        let Statement::Insert(insert) = parse(
            "INSERT INTO t (a, b) VALUES (1, 2) ON CONFLICT (a) DO UPDATE SET b = 3 WHERE b < 3 RETURNING a",
        ) else {
            panic!("expected INSERT");
        };
        assert_eq!(insert.columns, vec!["a", "b"]);
        let upsert = insert.upsert.unwrap();
        assert_eq!(upsert.target, vec!["a"]);
        assert!(matches!(
            upsert.action,
            UpsertAction::Update { ref assignments, where_clause: Some(_) } if assignments.len() == 1
        ));
        assert_eq!(insert.returning, vec![Statement::name(["a"])]);
    }

    #[test]
    fn test_returning_star_must_end_statement() {
        let err = parse_err("DELETE FROM t RETURNING *, a");
        assert_eq!(err.context, "returning");
    }

    #[test]
    fn test_compound_assignment() {
        let Statement::Update(update) = parse("UPDATE t SET n += 1") else {
            panic!("expected UPDATE");
        };
        assert_eq!(update.assignments[0].op, "+=");
    }

    #[test]
    fn test_merge_requires_a_clause() {
        let err = parse_err("MERGE INTO t USING s ON t.id = s.id");
        assert_eq!(err.context, "merge");
    }

    #[test]
    fn test_merge_clauses() {
        let Statement::Merge(merge) = parse(
            "MERGE INTO t USING s ON t.id = s.id \
             WHEN MATCHED AND s.gone THEN DELETE \
             WHEN NOT MATCHED THEN INSERT (id) VALUES (s.id)",
        ) else {
            panic!("expected MERGE");
        };
        assert_eq!(merge.clauses.len(), 2);
        assert!(merge.clauses[0].matched);
        assert!(merge.clauses[0].condition.is_some());
        assert_eq!(merge.clauses[0].action, MergeAction::Delete);
        assert!(!merge.clauses[1].matched);
    }

    #[test]
    fn test_truncate_with_and_without_table() {
        assert_eq!(parse("TRUNCATE a, b"), parse("TRUNCATE TABLE a, b"));
    }
}
