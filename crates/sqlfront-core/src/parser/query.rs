//! Query grammar: `SELECT`, set operations, `WITH`, `VALUES` and the
//! clauses they share.

use super::expr::{self, implicit_alias};
use super::pratt::LOWEST;
use super::registry::Context;
use super::{ParseError, Parser};
use crate::ast::{
    Compound, Cte, FrameBound, FrameExclusion, FrameSpec, FrameUnit, Join, JoinCondition, Limit,
    LimitStyle, Materialization, NullsOrder, OrderDirection, Select, Statement, Window,
    WindowDefinition, With,
};
use crate::lexer::{Token, TokenKind};

type Result<T> = std::result::Result<T, ParseError>;

/// Join keywords that start a [`Join`] in a table list.
const JOIN_KEYWORDS: [&str; 10] = [
    "JOIN",
    "INNER JOIN",
    "LEFT JOIN",
    "LEFT OUTER JOIN",
    "RIGHT JOIN",
    "RIGHT OUTER JOIN",
    "FULL JOIN",
    "FULL OUTER JOIN",
    "CROSS JOIN",
    "NATURAL JOIN",
];

/// Returns true if `token` can start a query.
#[must_use]
pub fn is_query_start(token: &Token) -> bool {
    token.is_keyword() && matches!(token.literal.as_str(), "SELECT" | "WITH" | "VALUES")
}

/// Parses a query with any trailing `UNION`/`INTERSECT`/`EXCEPT` terms.
///
/// # Errors
///
/// Returns a `ParseError` if the query is malformed.
pub fn parse_query(p: &mut Parser) -> Result<Statement> {
    let mut left = parse_query_term(p)?;
    while p.check_any_keyword(&["UNION", "INTERSECT", "EXCEPT"]) {
        let op = p.advance().literal;
        let all = p.consume_keyword("ALL");
        let distinct = !all && p.consume_keyword("DISTINCT");
        let right = parse_query_term(p)?;
        let compound = Compound {
            left: Box::new(left),
            right: Box::new(right),
            all,
            distinct,
        };
        left = match op.as_str() {
            "UNION" => Statement::Union(compound),
            "INTERSECT" => Statement::Intersect(compound),
            _ => Statement::Except(compound),
        };
    }
    Ok(left)
}

fn parse_query_term(p: &mut Parser) -> Result<Statement> {
    if p.check(TokenKind::LeftParen) {
        return expr::group(p);
    }
    if p.check_keyword("SELECT") {
        parse_select(p)
    } else if p.check_keyword("WITH") {
        parse_with(p)
    } else if p.check_keyword("VALUES") {
        parse_values(p)
    } else {
        Err(p.unexpected("query", "SELECT, WITH, VALUES or '('"))
    }
}

/// Statement handler for `SELECT`.
pub(super) fn select_statement(p: &mut Parser) -> Result<Statement> {
    parse_query(p)
}

/// Statement handler for `VALUES`.
pub(super) fn values_statement(p: &mut Parser) -> Result<Statement> {
    parse_query(p)
}

/// Statement handler for `WITH`.
pub(super) fn with_statement(p: &mut Parser) -> Result<Statement> {
    parse_with(p)
}

fn parse_select(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("SELECT", "select")?;
    let distinct = p.consume_keyword("DISTINCT");

    let mut columns = vec![parse_column(p)?];
    while p.consume(TokenKind::Comma) {
        columns.push(parse_column(p)?);
    }

    let tables = if p.consume_keyword("FROM") {
        parse_table_list(p)?
    } else {
        Vec::new()
    };

    let where_clause = if p.consume_keyword("WHERE") {
        Some(p.parse_expression_in(Context::Predicate)?)
    } else {
        None
    };

    let group_by = if p.consume_keyword("GROUP BY") {
        p.parse_expression_list(Context::Predicate)?
    } else {
        Vec::new()
    };

    let having = if p.consume_keyword("HAVING") {
        Some(p.parse_expression_in(Context::Predicate)?)
    } else {
        None
    };

    let mut windows = Vec::new();
    if p.consume_keyword("WINDOW") {
        loop {
            let name = p.expect_identifier("window")?;
            p.expect_keyword("AS", "window")?;
            p.expect(TokenKind::LeftParen, "window")?;
            let window = parse_window(p)?;
            p.expect(TokenKind::RightParen, "window")?;
            windows.push(WindowDefinition { name, window });
            if !p.consume(TokenKind::Comma) {
                break;
            }
        }
    }

    let order_by = if p.consume_keyword("ORDER BY") {
        parse_order_list(p)?
    } else {
        Vec::new()
    };

    let limit = parse_limit(p)?;

    Ok(Statement::Select(Box::new(Select {
        distinct,
        columns,
        tables,
        where_clause,
        group_by,
        having,
        windows,
        order_by,
        limit,
    })))
}

fn parse_column(p: &mut Parser) -> Result<Statement> {
    p.with_context(Context::Expression, |p| {
        let column = p.parse_expression(LOWEST)?;
        Ok(implicit_alias(p, column))
    })
}

/// Parses a table reference: a name, subquery or table function with an
/// optional alias.
///
/// # Errors
///
/// Returns a `ParseError` if no table reference follows.
pub fn parse_table_reference(p: &mut Parser) -> Result<Statement> {
    p.with_context(Context::TableReference, |p| {
        if p.registry().prefix(&p.current().symbol()).is_none() {
            return Err(p.unexpected("from", "table name or subquery"));
        }
        let table = p.parse_expression(LOWEST)?;
        Ok(implicit_alias(p, table))
    })
}

/// Parses comma-separated table references and joins.
///
/// # Errors
///
/// Returns a `ParseError` if a reference or join is malformed.
pub fn parse_table_list(p: &mut Parser) -> Result<Vec<Statement>> {
    let mut tables = vec![parse_table_reference(p)?];
    loop {
        if p.consume(TokenKind::Comma) {
            tables.push(parse_table_reference(p)?);
        } else if p.check_any_keyword(&JOIN_KEYWORDS) {
            tables.push(parse_join(p)?);
        } else {
            break;
        }
    }
    Ok(tables)
}

fn parse_join(p: &mut Parser) -> Result<Statement> {
    let kind = p.advance().literal;
    let table = parse_table_reference(p)?;
    let condition = if matches!(kind.as_str(), "CROSS JOIN" | "NATURAL JOIN") {
        None
    } else if p.consume_keyword("ON") {
        Some(JoinCondition::On(Box::new(
            p.parse_expression_in(Context::Predicate)?,
        )))
    } else if p.consume_keyword("USING") {
        Some(JoinCondition::Using(p.parse_column_list("join")?))
    } else {
        None
    };
    Ok(Statement::Join(Join {
        kind,
        table: Box::new(table),
        condition,
    }))
}

/// Parses `ORDER BY` items.
///
/// # Errors
///
/// Returns a `ParseError` if an item is malformed.
pub fn parse_order_list(p: &mut Parser) -> Result<Vec<Statement>> {
    let mut items = vec![parse_order_item(p)?];
    while p.consume(TokenKind::Comma) {
        items.push(parse_order_item(p)?);
    }
    Ok(items)
}

fn parse_order_item(p: &mut Parser) -> Result<Statement> {
    let statement = p.parse_expression_in(Context::Predicate)?;
    let direction = if p.consume_keyword("ASC") {
        Some(OrderDirection::Asc)
    } else if p.consume_keyword("DESC") {
        Some(OrderDirection::Desc)
    } else {
        None
    };
    let nulls = if p.consume_keyword("NULLS FIRST") {
        Some(NullsOrder::First)
    } else if p.consume_keyword("NULLS LAST") {
        Some(NullsOrder::Last)
    } else {
        None
    };
    Ok(Statement::Order {
        statement: Box::new(statement),
        direction,
        nulls,
    })
}

fn parse_limit(p: &mut Parser) -> Result<Option<Limit>> {
    if p.consume_keyword("LIMIT") {
        let count = Some(p.parse_expression_in(Context::Predicate)?);
        if p.consume(TokenKind::Comma) {
            let offset = Some(p.parse_expression_in(Context::Predicate)?);
            return Ok(Some(Limit {
                count,
                offset,
                style: LimitStyle::Comma,
            }));
        }
        let offset = if p.consume_keyword("OFFSET") {
            Some(p.parse_expression_in(Context::Predicate)?)
        } else {
            None
        };
        return Ok(Some(Limit {
            count,
            offset,
            style: LimitStyle::Limit,
        }));
    }

    let offset = if p.consume_keyword("OFFSET") {
        let offset = p.parse_expression_in(Context::Predicate)?;
        let _ = p.consume_keyword("ROWS") || p.consume_keyword("ROW");
        Some(offset)
    } else {
        None
    };
    let count = if p.check_any_keyword(&["FETCH FIRST", "FETCH NEXT"]) {
        p.advance();
        let count = p.parse_expression_in(Context::Predicate)?;
        if !(p.consume_keyword("ROWS") || p.consume_keyword("ROW")) {
            return Err(p.unexpected("fetch", "ROWS"));
        }
        p.expect_keyword("ONLY", "fetch")?;
        Some(count)
    } else {
        None
    };

    if offset.is_none() && count.is_none() {
        return Ok(None);
    }
    Ok(Some(Limit {
        count,
        offset,
        style: LimitStyle::Fetch,
    }))
}

/// Parses the inside of a window specification (without parentheses).
///
/// # Errors
///
/// Returns a `ParseError` if a clause is malformed.
pub fn parse_window(p: &mut Parser) -> Result<Window> {
    let mut window = Window::default();
    if p.current().is_identifier() {
        window.base = Some(p.advance().literal);
    }
    if p.consume_keyword("PARTITION BY") {
        window.partition_by = p.parse_expression_list(Context::Predicate)?;
    }
    if p.consume_keyword("ORDER BY") {
        window.order_by = parse_order_list(p)?;
    }
    if p.check_any_keyword(&["ROWS", "RANGE", "GROUPS"]) {
        window.frame = Some(parse_frame(p)?);
    }
    Ok(window)
}

fn parse_frame(p: &mut Parser) -> Result<FrameSpec> {
    let unit = match p.advance().literal.as_str() {
        "ROWS" => FrameUnit::Rows,
        "RANGE" => FrameUnit::Range,
        _ => FrameUnit::Groups,
    };
    let (start, end) = if p.consume_keyword("BETWEEN") {
        let start = parse_frame_bound(p)?;
        p.expect_keyword("AND", "frame")?;
        (start, Some(parse_frame_bound(p)?))
    } else {
        (parse_frame_bound(p)?, None)
    };
    let exclude = if p.consume_keyword("EXCLUDE CURRENT ROW") {
        Some(FrameExclusion::CurrentRow)
    } else if p.consume_keyword("EXCLUDE GROUP") {
        Some(FrameExclusion::Group)
    } else if p.consume_keyword("EXCLUDE TIES") {
        Some(FrameExclusion::Ties)
    } else if p.consume_keyword("EXCLUDE NO OTHERS") {
        Some(FrameExclusion::NoOthers)
    } else {
        None
    };
    Ok(FrameSpec {
        unit,
        start,
        end,
        exclude,
    })
}

fn parse_frame_bound(p: &mut Parser) -> Result<FrameBound> {
    if p.consume_keyword("CURRENT ROW") {
        return Ok(FrameBound::CurrentRow);
    }
    if p.consume_keyword("UNBOUNDED PRECEDING") {
        return Ok(FrameBound::UnboundedPreceding);
    }
    if p.consume_keyword("UNBOUNDED FOLLOWING") {
        return Ok(FrameBound::UnboundedFollowing);
    }
    let offset = Box::new(p.parse_expression_in(Context::Predicate)?);
    if p.consume_keyword("PRECEDING") {
        Ok(FrameBound::Preceding(offset))
    } else if p.consume_keyword("FOLLOWING") {
        Ok(FrameBound::Following(offset))
    } else {
        Err(p.unexpected("frame", "PRECEDING or FOLLOWING"))
    }
}

fn parse_values(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("VALUES", "values")?;
    let mut rows = Vec::new();
    loop {
        if !p.check(TokenKind::LeftParen) {
            return Err(p.unexpected("values", "'('"));
        }
        rows.push(expr::group(p)?);
        if !p.consume(TokenKind::Comma) {
            break;
        }
    }
    Ok(Statement::Values(rows))
}

fn parse_with(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("WITH", "with")?;
    let recursive = p.consume_keyword("RECURSIVE");

    let mut ctes = vec![parse_cte(p)?];
    while p.consume(TokenKind::Comma) {
        ctes.push(parse_cte(p)?);
    }

    let body = p.parse_statement()?;
    Ok(Statement::With(With {
        recursive,
        ctes,
        body: Box::new(body),
    }))
}

fn parse_cte(p: &mut Parser) -> Result<Cte> {
    let name = p.expect_identifier("with")?;
    let columns = if p.check(TokenKind::LeftParen) {
        p.parse_column_list("with")?
    } else {
        Vec::new()
    };
    p.expect_keyword("AS", "with")?;

    let materialization = if p.consume_keyword("MATERIALIZED") {
        Some(Materialization::Materialized)
    } else if p.check_keyword("NOT") && p.peek().is_keyword_literal("MATERIALIZED") {
        p.advance();
        p.advance();
        Some(Materialization::NotMaterialized)
    } else {
        None
    };

    p.expect(TokenKind::LeftParen, "with")?;
    let body = p.parse_statement()?;
    p.expect(TokenKind::RightParen, "with")?;

    Ok(Cte {
        name,
        columns,
        materialization,
        body: Box::new(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(sql: &str) -> Select {
        match Parser::new(sql).parse() {
            Ok(Some(Statement::Select(select))) => *select,
            other => panic!("expected SELECT, got {other:?}"),
        }
    }

    #[test]
    fn test_implicit_and_explicit_aliases() {
        let s = select("SELECT a x, b AS y FROM t u");
        assert!(matches!(&s.columns[0], Statement::Alias { alias, explicit: false, .. } if alias == "x"));
        assert!(matches!(&s.columns[1], Statement::Alias { alias, explicit: true, .. } if alias == "y"));
        assert!(matches!(&s.tables[0], Statement::Alias { alias, .. } if alias == "u"));
    }

    #[test]
    fn test_table_reference_rejects_literals() {
        let err = Parser::new("SELECT a FROM 1").parse().unwrap_err();
        assert_eq!(err.as_syntax().unwrap().context, "from");
    }

    #[test]
    fn test_limit_comma_is_count_then_offset() {
        let limit = select("SELECT a FROM t LIMIT 10, 20").limit.unwrap();
        assert_eq!(limit.style, LimitStyle::Comma);
        assert_eq!(limit.count, Some(Statement::number("10")));
        assert_eq!(limit.offset, Some(Statement::number("20")));
    }

    #[test]
    fn test_offset_fetch() {
        let limit = select("SELECT a FROM t OFFSET 5 ROWS FETCH NEXT 10 ROWS ONLY")
            .limit
            .unwrap();
        assert_eq!(limit.style, LimitStyle::Fetch);
        assert_eq!(limit.count, Some(Statement::number("10")));
        assert_eq!(limit.offset, Some(Statement::number("5")));
    }

    #[test]
    fn test_fetch_requires_only() {
        let err = Parser::new("SELECT a FROM t FETCH FIRST 1 ROWS").parse().unwrap_err();
        assert_eq!(err.as_syntax().unwrap().context, "fetch");
    }

    #[test]
    fn test_order_by_direction_and_nulls() {
        let s = select("SELECT a FROM t ORDER BY a DESC NULLS LAST, b");
        assert_eq!(
            s.order_by[0],
            Statement::Order {
                statement: Box::new(Statement::name(["a"])),
                direction: Some(OrderDirection::Desc),
                nulls: Some(NullsOrder::Last),
            }
        );
        assert!(matches!(&s.order_by[1], Statement::Order { direction: None, nulls: None, .. }));
    }

    #[test]
    fn test_window_frame() {
        let s = select(
            "SELECT sum(x) OVER w FROM t WINDOW w AS (PARTITION BY g ORDER BY x \
             ROWS BETWEEN UNBOUNDED PRECEDING AND 1 FOLLOWING EXCLUDE TIES)",
        );
        let frame = s.windows[0].window.frame.clone().unwrap();
        assert_eq!(frame.unit, FrameUnit::Rows);
        assert_eq!(frame.start, FrameBound::UnboundedPreceding);
        assert_eq!(
            frame.end,
            Some(FrameBound::Following(Box::new(Statement::number("1"))))
        );
        assert_eq!(frame.exclude, Some(FrameExclusion::Ties));
    }

    #[test]
    fn test_union_all_is_left_associative() {
        let stmt = Parser::new("SELECT 1 UNION ALL SELECT 2 EXCEPT SELECT 3")
            .parse()
            .unwrap()
            .unwrap();
        let Statement::Except(outer) = stmt else {
            panic!("expected EXCEPT");
        };
        assert!(matches!(*outer.left, Statement::Union(Compound { all: true, .. })));
    }

    #[test]
    fn test_cte_materialization() {
        let stmt = Parser::new("WITH a AS NOT MATERIALIZED (SELECT 1) SELECT * FROM a")
            .parse()
            .unwrap()
            .unwrap();
        let Statement::With(with) = stmt else {
            panic!("expected WITH");
        };
        assert_eq!(
            with.ctes[0].materialization,
            Some(Materialization::NotMaterialized)
        );
    }
}
