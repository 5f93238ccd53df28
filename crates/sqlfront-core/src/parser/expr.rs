//! Prefix and infix expression handlers.
//!
//! Each handler starts at the token that triggered it. Prefix handlers
//! consume an operand; infix handlers receive the operand parsed so far
//! and return the node that replaces it.

use super::pratt::{self, binding_power, LOWEST};
use super::query;
use super::registry::{Context, Registry};
use super::{ParseError, Parser};
use crate::ast::{Call, Case, Statement, ValueKind, When};
use crate::lexer::{Symbol, TokenKind};

type Result<T> = std::result::Result<T, ParseError>;

/// Constants accepted by `IS [NOT]`.
const TRUTH_VALUES: [&str; 4] = ["NULL", "TRUE", "FALSE", "UNKNOWN"];

/// Builds the registry with every standard expression handler.
#[must_use]
pub fn standard_registry() -> Registry {
    let mut registry = Registry::new();

    registry.register_prefix(Symbol::kind(TokenKind::Identifier), name);
    registry.register_prefix(Symbol::kind(TokenKind::QuotedIdentifier), name);
    registry.register_prefix(Symbol::kind(TokenKind::Macro), variable);
    registry.register_prefix(Symbol::kind(TokenKind::Number), number);
    registry.register_prefix(Symbol::kind(TokenKind::String), string);
    for kind in [
        TokenKind::Question,
        TokenKind::NamedPlaceholder,
        TokenKind::PositionalPlaceholder,
    ] {
        registry.register_prefix(Symbol::kind(kind), placeholder);
    }
    for keyword in ["NULL", "TRUE", "FALSE", "DEFAULT", "UNKNOWN"] {
        registry.register_prefix(Symbol::keyword(keyword), constant);
    }
    registry.register_prefix(Symbol::kind(TokenKind::LeftParen), group);
    registry.register_prefix(Symbol::kind(TokenKind::Star), star);
    for kind in [TokenKind::Minus, TokenKind::Plus, TokenKind::Tilde] {
        registry.register_prefix(Symbol::kind(kind), unary);
    }
    registry.register_prefix(Symbol::keyword("NOT"), not);
    registry.register_prefix(Symbol::keyword("EXISTS"), exists);
    registry.register_prefix(Symbol::keyword("CASE"), case);
    registry.register_prefix(Symbol::keyword("CAST"), cast);
    registry.register_prefix(Symbol::keyword("ROW"), row);

    for kind in [
        TokenKind::Eq,
        TokenKind::NotEq,
        TokenKind::Lt,
        TokenKind::LtEq,
        TokenKind::Gt,
        TokenKind::GtEq,
        TokenKind::Arrow,
        TokenKind::Pipe,
        TokenKind::Ampersand,
        TokenKind::ShiftLeft,
        TokenKind::ShiftRight,
        TokenKind::Concat,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
    ] {
        registry.register_infix(Symbol::kind(kind), binary);
    }
    for keyword in ["AND", "OR", "LIKE", "ILIKE", "SIMILAR TO"] {
        registry.register_infix(Symbol::keyword(keyword), binary);
    }
    registry.register_infix(Symbol::keyword("BETWEEN"), between);
    registry.register_infix(Symbol::keyword("IN"), in_set);
    registry.register_infix(Symbol::keyword("IS"), is);
    registry.register_infix(Symbol::keyword("ISNULL"), null_test);
    registry.register_infix(Symbol::keyword("NOTNULL"), null_test);
    registry.register_infix(Symbol::keyword("COLLATE"), collate);
    registry.register_infix(Symbol::keyword("NOT"), negated);
    registry.register_infix(Symbol::kind(TokenKind::LeftParen), call);
    registry.register_infix(Symbol::keyword("AS"), alias);

    registry
}

// --- Prefix handlers ---

/// Parses a dotted name: `a`, `t.a`, `"s"."t"`, `t.*`.
///
/// # Errors
///
/// Returns a `ParseError` if a `.` is not followed by a name part or `*`.
pub fn name(p: &mut Parser) -> Result<Statement> {
    let mut parts = vec![p.advance().literal];
    while p.consume(TokenKind::Dot) {
        let current = p.current();
        if current.is_identifier() {
            parts.push(p.advance().literal);
        } else if current.is_keyword() {
            let part = p.spelling(current);
            p.advance();
            parts.push(part);
        } else if current.kind == TokenKind::Star {
            p.advance();
            parts.push("*".to_string());
            break;
        } else {
            return Err(p.unexpected("name", "identifier or '*' after '.'"));
        }
    }
    Ok(Statement::Name { parts })
}

fn variable(p: &mut Parser) -> Result<Statement> {
    Ok(Statement::name([p.advance().literal]))
}

fn number(p: &mut Parser) -> Result<Statement> {
    Ok(Statement::number(p.advance().literal))
}

fn string(p: &mut Parser) -> Result<Statement> {
    Ok(Statement::string(p.advance().literal))
}

fn placeholder(p: &mut Parser) -> Result<Statement> {
    Ok(Statement::Value {
        literal: p.advance().literal,
        kind: ValueKind::Placeholder,
    })
}

fn constant(p: &mut Parser) -> Result<Statement> {
    Ok(Statement::constant(p.advance().literal))
}

fn star(p: &mut Parser) -> Result<Statement> {
    p.advance();
    Ok(Statement::name(["*"]))
}

/// Parses a parenthesized node: a subquery, a single expression or a
/// value list.
///
/// # Errors
///
/// Returns a `ParseError` if the contents are malformed or `)` is missing.
pub fn group(p: &mut Parser) -> Result<Statement> {
    p.expect(TokenKind::LeftParen, "group")?;
    let inner = if query::is_query_start(p.current()) {
        query::parse_query(p)?
    } else {
        Statement::list(p.parse_expression_list(Context::Predicate)?)
    };
    p.expect(TokenKind::RightParen, "group")?;
    Ok(Statement::Group(Box::new(inner)))
}

fn unary(p: &mut Parser) -> Result<Statement> {
    let op = p.advance().literal;
    let operand = p.parse_expression(pratt::UNARY)?;
    Ok(Statement::Unary {
        op,
        operand: Box::new(operand),
    })
}

fn not(p: &mut Parser) -> Result<Statement> {
    p.advance();
    let operand = p.parse_expression(pratt::NOT)?;
    Ok(Statement::Not(Box::new(operand)))
}

fn exists(p: &mut Parser) -> Result<Statement> {
    p.advance();
    if !p.check(TokenKind::LeftParen) {
        return Err(p.unexpected("exists", "'(' and a subquery"));
    }
    Ok(Statement::Exists(Box::new(group(p)?)))
}

fn case(p: &mut Parser) -> Result<Statement> {
    p.advance();
    let operand = if p.check_keyword("WHEN") {
        None
    } else {
        Some(Box::new(p.parse_expression_in(Context::Predicate)?))
    };

    let mut whens = Vec::new();
    while p.consume_keyword("WHEN") {
        let condition = p.parse_expression_in(Context::Predicate)?;
        if !p.consume_keyword("THEN") {
            return Err(p.unexpected("case", "THEN"));
        }
        let result = p.parse_expression_in(Context::Predicate)?;
        whens.push(When { condition, result });
    }
    if whens.is_empty() {
        return Err(p.unexpected("case", "WHEN"));
    }

    let otherwise = if p.consume_keyword("ELSE") {
        Some(Box::new(p.parse_expression_in(Context::Predicate)?))
    } else {
        None
    };
    p.expect_keyword("END", "case")?;

    Ok(Statement::Case(Case {
        operand,
        whens,
        otherwise,
    }))
}

fn cast(p: &mut Parser) -> Result<Statement> {
    p.advance();
    p.expect(TokenKind::LeftParen, "cast")?;
    let statement = p.parse_expression_in(Context::Predicate)?;
    p.expect_keyword("AS", "cast")?;
    let type_name = parse_type_name(p, "cast")?;
    p.expect(TokenKind::RightParen, "cast")?;
    Ok(Statement::Cast {
        statement: Box::new(statement),
        type_name,
    })
}

fn row(p: &mut Parser) -> Result<Statement> {
    p.advance();
    p.expect(TokenKind::LeftParen, "row")?;
    let items = if p.check(TokenKind::RightParen) {
        Vec::new()
    } else {
        p.parse_expression_list(Context::Predicate)?
    };
    p.expect(TokenKind::RightParen, "row")?;
    Ok(Statement::Row(items))
}

/// Returns true when the current keyword is used as a function name, as in
/// `LEFT(s, 2)`.
pub(super) fn is_keyword_function(p: &Parser) -> bool {
    let current = p.current();
    current.is_keyword()
        && p.peek().kind == TokenKind::LeftParen
        && !current.is_keyword_literal("NOT")
        && binding_power(&current.symbol()) == LOWEST
}

/// Turns the current keyword into a function name; the call handler
/// takes over at `(`.
pub(super) fn keyword_function(p: &mut Parser) -> Result<Statement> {
    Ok(Statement::name([p.advance().literal]))
}

// --- Infix handlers ---

fn binary(p: &mut Parser, left: Statement) -> Result<Statement> {
    let op = p.advance();
    let right = p.parse_expression(binding_power(&op.symbol()))?;
    Ok(Statement::binary(left, op.literal, right))
}

fn between(p: &mut Parser, left: Statement) -> Result<Statement> {
    p.advance();
    let lower = p.parse_expression(pratt::AND)?;
    p.expect_keyword("AND", "between")?;
    let upper = p.parse_expression(pratt::AND)?;
    Ok(Statement::Between {
        subject: Box::new(left),
        lower: Box::new(lower),
        upper: Box::new(upper),
    })
}

fn in_set(p: &mut Parser, left: Statement) -> Result<Statement> {
    p.advance();
    let set = if p.check(TokenKind::LeftParen) {
        group(p)?
    } else if p.current().is_identifier() {
        name(p)?
    } else {
        return Err(p.unexpected("in", "'(' or a name"));
    };
    Ok(Statement::In {
        subject: Box::new(left),
        set: Box::new(set),
    })
}

fn is(p: &mut Parser, left: Statement) -> Result<Statement> {
    p.advance();
    let not = p.consume_keyword("NOT");
    if !p.check_any_keyword(&TRUTH_VALUES) {
        return Err(p.unexpected("is", "NULL, TRUE, FALSE or UNKNOWN"));
    }
    let target = Statement::constant(p.advance().literal);
    Ok(Statement::Is {
        subject: Box::new(left),
        not,
        target: Box::new(target),
    })
}

fn null_test(p: &mut Parser, left: Statement) -> Result<Statement> {
    let not = p.advance().literal == "NOTNULL";
    Ok(Statement::Is {
        subject: Box::new(left),
        not,
        target: Box::new(Statement::constant("NULL")),
    })
}

fn collate(p: &mut Parser, left: Statement) -> Result<Statement> {
    p.advance();
    let collation = p.expect_identifier("collate")?;
    Ok(Statement::Collate {
        statement: Box::new(left),
        collation,
    })
}

/// `NOT` in infix position: runs the following keyword's handler and
/// negates the result.
fn negated(p: &mut Parser, left: Statement) -> Result<Statement> {
    p.advance();
    let Some(handler) = p.registry().infix(&p.current().symbol()) else {
        return Err(p.unexpected("not", "IN, LIKE, ILIKE, SIMILAR TO or BETWEEN"));
    };
    let inner = handler(p, left)?;
    Ok(Statement::Not(Box::new(inner)))
}

fn call(p: &mut Parser, left: Statement) -> Result<Statement> {
    let Statement::Name { parts } = left else {
        return Err(p.unexpected("call", "a function name before '('"));
    };
    p.advance();

    let mut call = Call {
        name: parts,
        distinct: false,
        args: Vec::new(),
        filter: None,
        over: None,
    };
    if !p.check(TokenKind::RightParen) {
        call.distinct = p.consume_keyword("DISTINCT");
        call.args = p.parse_expression_list(Context::Predicate)?;
    }
    p.expect(TokenKind::RightParen, "call")?;

    if p.consume_keyword("FILTER") {
        p.expect(TokenKind::LeftParen, "filter")?;
        p.expect_keyword("WHERE", "filter")?;
        call.filter = Some(Box::new(p.parse_expression_in(Context::Predicate)?));
        p.expect(TokenKind::RightParen, "filter")?;
    }
    if p.consume_keyword("OVER") {
        let over = if p.consume(TokenKind::LeftParen) {
            let window = query::parse_window(p)?;
            p.expect(TokenKind::RightParen, "over")?;
            Statement::Window(window)
        } else {
            Statement::name([p.expect_identifier("over")?])
        };
        call.over = Some(Box::new(over));
    }

    Ok(Statement::Call(call))
}

fn alias(p: &mut Parser, left: Statement) -> Result<Statement> {
    p.advance();
    let alias = p.expect_identifier("alias")?;
    Ok(Statement::Alias {
        statement: Box::new(left),
        alias,
        explicit: true,
    })
}

/// Wraps `statement` in an implicit alias when an identifier follows it.
pub(super) fn implicit_alias(p: &mut Parser, statement: Statement) -> Statement {
    if matches!(statement, Statement::Alias { .. }) || !p.current().is_identifier() {
        return statement;
    }
    Statement::Alias {
        statement: Box::new(statement),
        alias: p.advance().literal,
        explicit: false,
    }
}

/// Parses a type name such as `INT`, `DOUBLE PRECISION` or
/// `NUMERIC(10, 2)`.
///
/// # Errors
///
/// Returns a `ParseError` tagged with `context` if no type name follows.
pub fn parse_type_name(p: &mut Parser, context: &'static str) -> Result<String> {
    let mut type_name = p.expect_identifier(context)?;
    while p.check(TokenKind::Identifier) {
        type_name.push(' ');
        type_name.push_str(&p.advance().literal);
    }
    if p.consume(TokenKind::LeftParen) {
        let mut args = vec![p.expect(TokenKind::Number, context)?.literal];
        while p.consume(TokenKind::Comma) {
            args.push(p.expect(TokenKind::Number, context)?.literal);
        }
        p.expect(TokenKind::RightParen, context)?;
        type_name = format!("{type_name}({})", args.join(", "));
    }
    Ok(type_name)
}
