//! Data definition grammar: tables, views, constraints and procedures.

use super::expr::parse_type_name;
use super::query;
use super::registry::Context;
use super::{ParseError, Parser};
use crate::ast::{
    AlterTable, AlterTableAction, ColumnDefinition, Constraint, ConstraintKind, CreateProcedure,
    CreateTable, CreateView, DropBehavior, DropStatement, ParameterMode, ProcedureParameter,
    ReferentialAction, Statement,
};
use crate::lexer::{Token, TokenKind};

type Result<T> = std::result::Result<T, ParseError>;

/// Keywords that open a table-level constraint.
const TABLE_CONSTRAINTS: [&str; 5] = ["CONSTRAINT", "PRIMARY KEY", "FOREIGN KEY", "UNIQUE", "CHECK"];

/// `CREATE [TEMPORARY] TABLE [IF NOT EXISTS] name (...)` or `... AS query`.
pub(super) fn create_table_statement(p: &mut Parser) -> Result<Statement> {
    let temporary = p.advance().literal == "CREATE TEMPORARY TABLE";
    let if_not_exists = parse_if_not_exists(p)?;
    let name = p.parse_name("create table")?;

    if p.consume_keyword("AS") {
        let query = query::parse_query(p)?;
        return Ok(Statement::CreateTable(Box::new(CreateTable {
            temporary,
            if_not_exists,
            name,
            columns: Vec::new(),
            constraints: Vec::new(),
            as_query: Some(Box::new(query)),
        })));
    }

    p.expect(TokenKind::LeftParen, "create table")?;
    let mut columns = Vec::new();
    let mut constraints = Vec::new();
    loop {
        if p.check_any_keyword(&TABLE_CONSTRAINTS) {
            constraints.push(parse_table_constraint(p)?);
        } else {
            columns.push(parse_column_definition(p)?);
        }
        if !p.consume(TokenKind::Comma) {
            break;
        }
    }
    p.expect(TokenKind::RightParen, "create table")?;

    Ok(Statement::CreateTable(Box::new(CreateTable {
        temporary,
        if_not_exists,
        name,
        columns,
        constraints,
        as_query: None,
    })))
}

fn parse_if_not_exists(p: &mut Parser) -> Result<bool> {
    if !p.consume_keyword("IF") {
        return Ok(false);
    }
    p.expect_keyword("NOT", "create table")?;
    p.expect_keyword("EXISTS", "create table")?;
    Ok(true)
}

fn parse_if_exists(p: &mut Parser) -> Result<bool> {
    if !p.consume_keyword("IF") {
        return Ok(false);
    }
    p.expect_keyword("EXISTS", "drop")?;
    Ok(true)
}

fn parse_column_definition(p: &mut Parser) -> Result<ColumnDefinition> {
    let name = p.expect_identifier("column")?;
    let type_name = if p.current().is_identifier() {
        Some(parse_type_name(p, "column")?)
    } else {
        None
    };
    let mut constraints = Vec::new();
    while let Some(constraint) = parse_constraint(p)? {
        constraints.push(constraint);
    }
    Ok(ColumnDefinition {
        name,
        type_name,
        constraints,
    })
}

fn parse_table_constraint(p: &mut Parser) -> Result<Constraint> {
    match parse_constraint(p)? {
        Some(constraint) => Ok(constraint),
        None => Err(p.unexpected("constraint", "a table constraint")),
    }
}

/// Parses one constraint, or returns `None` if none starts here.
fn parse_constraint(p: &mut Parser) -> Result<Option<Constraint>> {
    let name = if p.consume_keyword("CONSTRAINT") {
        Some(p.expect_identifier("constraint")?)
    } else {
        None
    };

    let kind = if p.consume_keyword("PRIMARY KEY") {
        ConstraintKind::PrimaryKey(parse_optional_columns(p)?)
    } else if p.consume_keyword("UNIQUE") {
        ConstraintKind::Unique(parse_optional_columns(p)?)
    } else if p.check_keyword("NOT") && p.peek().is_keyword_literal("NULL") {
        p.advance();
        p.advance();
        ConstraintKind::NotNull
    } else if p.consume_keyword("NULL") {
        ConstraintKind::Null
    } else if p.consume_keyword("CHECK") {
        p.expect(TokenKind::LeftParen, "check")?;
        let condition = p.parse_expression_in(Context::Predicate)?;
        p.expect(TokenKind::RightParen, "check")?;
        ConstraintKind::Check(Box::new(condition))
    } else if p.consume_keyword("DEFAULT") {
        ConstraintKind::Default(Box::new(p.parse_expression_in(Context::Predicate)?))
    } else if p.consume_keyword("FOREIGN KEY") {
        let columns = p.parse_column_list("foreign key")?;
        parse_references(p, columns)?
    } else if p.check_keyword("REFERENCES") {
        parse_references(p, Vec::new())?
    } else if p.consume_keyword("GENERATED ALWAYS AS") {
        p.expect(TokenKind::LeftParen, "generated")?;
        let expression = p.parse_expression_in(Context::Predicate)?;
        p.expect(TokenKind::RightParen, "generated")?;
        let stored = if p.consume_keyword("STORED") {
            Some(true)
        } else if p.consume_keyword("VIRTUAL") {
            Some(false)
        } else {
            None
        };
        ConstraintKind::Generated {
            expression: Box::new(expression),
            stored,
        }
    } else if name.is_some() {
        return Err(p.unexpected("constraint", "a constraint after CONSTRAINT name"));
    } else {
        return Ok(None);
    };

    Ok(Some(Constraint { name, kind }))
}

fn parse_optional_columns(p: &mut Parser) -> Result<Vec<String>> {
    if p.check(TokenKind::LeftParen) {
        p.parse_column_list("constraint")
    } else {
        Ok(Vec::new())
    }
}

fn parse_references(p: &mut Parser, columns: Vec<String>) -> Result<ConstraintKind> {
    p.expect_keyword("REFERENCES", "references")?;
    let table = p.parse_name("references")?;
    let referenced = parse_optional_columns(p)?;
    let mut on_delete = None;
    let mut on_update = None;
    loop {
        if p.consume_keyword("ON DELETE") {
            on_delete = Some(parse_referential_action(p)?);
        } else if p.consume_keyword("ON UPDATE") {
            on_update = Some(parse_referential_action(p)?);
        } else {
            break;
        }
    }
    Ok(ConstraintKind::ForeignKey {
        columns,
        table,
        referenced,
        on_delete,
        on_update,
    })
}

fn parse_referential_action(p: &mut Parser) -> Result<ReferentialAction> {
    let action = match p.current().literal.as_str() {
        _ if !p.current().is_keyword() => None,
        "CASCADE" => Some(ReferentialAction::Cascade),
        "RESTRICT" => Some(ReferentialAction::Restrict),
        "SET NULL" => Some(ReferentialAction::SetNull),
        "SET DEFAULT" => Some(ReferentialAction::SetDefault),
        "NO ACTION" => Some(ReferentialAction::NoAction),
        _ => None,
    };
    match action {
        Some(action) => {
            p.advance();
            Ok(action)
        }
        None => Err(p.unexpected(
            "references",
            "CASCADE, RESTRICT, SET NULL, SET DEFAULT or NO ACTION",
        )),
    }
}

/// `ALTER TABLE name {ADD | DROP | RENAME} ...`.
pub(super) fn alter_table_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("ALTER TABLE", "alter table")?;
    let name = p.parse_name("alter table")?;

    let action = if p.consume_keyword("ADD COLUMN") {
        AlterTableAction::AddColumn(parse_column_definition(p)?)
    } else if p.consume_keyword("ADD") {
        if p.current().is_identifier() {
            AlterTableAction::AddColumn(parse_column_definition(p)?)
        } else {
            AlterTableAction::AddConstraint(parse_table_constraint(p)?)
        }
    } else if p.consume_keyword("DROP COLUMN") {
        AlterTableAction::DropColumn(p.expect_identifier("alter table")?)
    } else if p.consume_keyword("DROP CONSTRAINT") {
        AlterTableAction::DropConstraint(p.expect_identifier("alter table")?)
    } else if p.consume_keyword("RENAME COLUMN") {
        let from = p.expect_identifier("alter table")?;
        p.expect_keyword("TO", "alter table")?;
        let to = p.expect_identifier("alter table")?;
        AlterTableAction::RenameColumn { from, to }
    } else if p.consume_keyword("RENAME CONSTRAINT") {
        let from = p.expect_identifier("alter table")?;
        p.expect_keyword("TO", "alter table")?;
        let to = p.expect_identifier("alter table")?;
        AlterTableAction::RenameConstraint { from, to }
    } else if p.consume_keyword("RENAME TO") {
        AlterTableAction::RenameTo(p.expect_identifier("alter table")?)
    } else {
        return Err(p.unexpected("alter table", "ADD, DROP or RENAME"));
    };

    Ok(Statement::AlterTable(Box::new(AlterTable { name, action })))
}

/// `CREATE [OR REPLACE] VIEW name [(columns)] AS query`.
pub(super) fn create_view_statement(p: &mut Parser) -> Result<Statement> {
    let or_replace = p.advance().literal == "CREATE OR REPLACE VIEW";
    let name = p.parse_name("create view")?;
    let columns = if p.check(TokenKind::LeftParen) {
        p.parse_column_list("create view")?
    } else {
        Vec::new()
    };
    p.expect_keyword("AS", "create view")?;
    let body = query::parse_query(p)?;
    Ok(Statement::CreateView(Box::new(CreateView {
        or_replace,
        name,
        columns,
        body,
    })))
}

/// `DROP {TABLE | VIEW} [IF EXISTS] names [CASCADE | RESTRICT]`.
pub(super) fn drop_statement(p: &mut Parser) -> Result<Statement> {
    let view = p.advance().literal == "DROP VIEW";
    let if_exists = parse_if_exists(p)?;
    let mut names = vec![p.parse_name("drop")?];
    while p.consume(TokenKind::Comma) {
        names.push(p.parse_name("drop")?);
    }
    let behavior = parse_drop_behavior(p);
    let drop = DropStatement {
        if_exists,
        names,
        behavior,
    };
    Ok(if view {
        Statement::DropView(drop)
    } else {
        Statement::DropTable(drop)
    })
}

/// Consumes an optional `CASCADE` or `RESTRICT`.
pub(super) fn parse_drop_behavior(p: &mut Parser) -> Option<DropBehavior> {
    if p.consume_keyword("CASCADE") {
        Some(DropBehavior::Cascade)
    } else if p.consume_keyword("RESTRICT") {
        Some(DropBehavior::Restrict)
    } else {
        None
    }
}

/// `CREATE [OR REPLACE] PROCEDURE name (params) [AS] BEGIN ... END`.
pub(super) fn create_procedure_statement(p: &mut Parser) -> Result<Statement> {
    let or_replace = p.advance().literal == "CREATE OR REPLACE PROCEDURE";
    let name = p.parse_name("procedure")?;

    p.expect(TokenKind::LeftParen, "procedure")?;
    let mut parameters = Vec::new();
    if !p.check(TokenKind::RightParen) {
        parameters.push(parse_parameter(p)?);
        while p.consume(TokenKind::Comma) {
            parameters.push(parse_parameter(p)?);
        }
    }
    p.expect(TokenKind::RightParen, "procedure")?;

    p.consume_keyword("AS");
    p.expect_keyword("BEGIN", "procedure")?;
    let body = p.parse_statement_list("procedure", is_end)?;
    p.expect_keyword("END", "procedure")?;

    Ok(Statement::CreateProcedure(Box::new(CreateProcedure {
        or_replace,
        name,
        parameters,
        body,
    })))
}

fn parse_parameter(p: &mut Parser) -> Result<ProcedureParameter> {
    let mode = if p.consume_keyword("IN") {
        Some(ParameterMode::In)
    } else if p.consume_keyword("OUT") {
        Some(ParameterMode::Out)
    } else if p.consume_keyword("INOUT") {
        Some(ParameterMode::InOut)
    } else {
        None
    };
    let name = if p.check(TokenKind::Macro) {
        p.advance().literal
    } else {
        p.expect_identifier("parameter")?
    };
    let type_name = parse_type_name(p, "parameter")?;
    let default = if p.consume_keyword("DEFAULT") {
        Some(p.parse_expression_in(Context::Predicate)?)
    } else {
        None
    };
    Ok(ProcedureParameter {
        mode,
        name,
        type_name,
        default,
    })
}

fn is_end(token: &Token) -> bool {
    token.is_keyword_literal("END")
}
