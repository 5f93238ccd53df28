//! Procedural statements: variables, control flow and blocks.

use super::dml::parse_assignment;
use super::expr::parse_type_name;
use super::registry::Context;
use super::{ParseError, Parser};
use crate::ast::{ElseIf, If, Statement};
use crate::lexer::{Token, TokenKind};

type Result<T> = std::result::Result<T, ParseError>;

/// `DECLARE name[, name] type [DEFAULT value]`.
pub(super) fn declare_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("DECLARE", "declare")?;
    let mut names = vec![parse_variable_name(p)?];
    while p.consume(TokenKind::Comma) {
        names.push(parse_variable_name(p)?);
    }
    let type_name = parse_type_name(p, "declare")?;
    let default = if p.consume_keyword("DEFAULT") {
        Some(Box::new(p.parse_expression_in(Context::Predicate)?))
    } else {
        None
    };
    Ok(Statement::Declare {
        names,
        type_name,
        default,
    })
}

fn parse_variable_name(p: &mut Parser) -> Result<String> {
    if p.check(TokenKind::Macro) {
        Ok(p.advance().literal)
    } else {
        p.expect_identifier("declare")
    }
}

/// `SET target = value`.
pub(super) fn set_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("SET", "set")?;
    Ok(Statement::Set(Box::new(parse_assignment(p)?)))
}

/// `IF cond THEN ... [ELSEIF cond THEN ...] [ELSE ...] END IF`.
///
/// `ELSIF` is accepted as a spelling of `ELSEIF`.
pub(super) fn if_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("IF", "if")?;
    let condition = parse_condition(p)?;
    let then = p.parse_statement_list("if", ends_branch)?;

    let mut else_ifs = Vec::new();
    while p.consume_keyword("ELSEIF") || p.consume_keyword("ELSIF") {
        let condition = parse_condition(p)?;
        let body = p.parse_statement_list("if", ends_branch)?;
        else_ifs.push(ElseIf { condition, body });
    }

    let otherwise = if p.consume_keyword("ELSE") {
        Some(p.parse_statement_list("if", |token| token.is_keyword_literal("END IF"))?)
    } else {
        None
    };
    p.expect_keyword("END IF", "if")?;

    Ok(Statement::If(If {
        condition: Box::new(condition),
        then,
        else_ifs,
        otherwise,
    }))
}

fn parse_condition(p: &mut Parser) -> Result<Statement> {
    let condition = p.parse_expression_in(Context::Predicate)?;
    p.expect_keyword("THEN", "if")?;
    Ok(condition)
}

fn ends_branch(token: &Token) -> bool {
    token.is_keyword()
        && matches!(
            token.literal.as_str(),
            "ELSEIF" | "ELSIF" | "ELSE" | "END IF"
        )
}

/// `WHILE cond DO ... END WHILE`.
pub(super) fn while_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("WHILE", "while")?;
    let condition = p.parse_expression_in(Context::Predicate)?;
    p.expect_keyword("DO", "while")?;
    let body = p.parse_statement_list("while", |token| token.is_keyword_literal("END WHILE"))?;
    p.expect_keyword("END WHILE", "while")?;
    Ok(Statement::While {
        condition: Box::new(condition),
        body,
    })
}

/// `RETURN [value]`.
pub(super) fn return_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("RETURN", "return")?;
    if p.current().is_terminator() || p.check_keyword("END") {
        return Ok(Statement::Return(None));
    }
    let value = p.parse_expression_in(Context::Predicate)?;
    Ok(Statement::Return(Some(Box::new(value))))
}

/// `BEGIN ... END`, or `BEGIN [WORK]` opening a transaction.
pub(super) fn begin_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("BEGIN", "begin")?;
    if p.current().is_terminator() {
        return Ok(Statement::StartTransaction(Vec::new()));
    }
    if p.consume_keyword("WORK") {
        return Ok(Statement::StartTransaction(Vec::new()));
    }
    let body = p.parse_statement_list("begin", |token| token.is_keyword_literal("END"))?;
    p.expect_keyword("END", "begin")?;
    Ok(Statement::Block(body))
}
