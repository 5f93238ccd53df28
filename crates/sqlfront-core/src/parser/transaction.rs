//! Transaction control and permission statements.

use super::ddl::parse_drop_behavior;
use super::{ParseError, Parser};
use crate::ast::{Permission, Statement, TransactionMode};
use crate::lexer::TokenKind;

type Result<T> = std::result::Result<T, ParseError>;

const ISOLATION_LEVELS: [&str; 4] = [
    "READ COMMITTED",
    "READ UNCOMMITTED",
    "REPEATABLE READ",
    "SERIALIZABLE",
];

/// `START TRANSACTION [modes]` and `BEGIN TRANSACTION [modes]`.
pub(super) fn start_transaction_statement(p: &mut Parser) -> Result<Statement> {
    p.advance();
    Ok(Statement::StartTransaction(parse_modes(p)?))
}

/// `SET TRANSACTION modes`.
pub(super) fn set_transaction_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("SET TRANSACTION", "transaction")?;
    let modes = parse_modes(p)?;
    if modes.is_empty() {
        return Err(p.unexpected("transaction", "a transaction mode"));
    }
    Ok(Statement::SetTransaction(modes))
}

fn parse_modes(p: &mut Parser) -> Result<Vec<TransactionMode>> {
    let mut modes = Vec::new();
    loop {
        if p.consume_keyword("ISOLATION LEVEL") {
            let Some(level) = ISOLATION_LEVELS
                .iter()
                .find(|level| p.check_keyword(level))
            else {
                return Err(p.unexpected("transaction", "an isolation level"));
            };
            modes.push(TransactionMode::IsolationLevel((*level).to_string()));
            p.advance();
        } else if p.consume_keyword("READ ONLY") {
            modes.push(TransactionMode::ReadOnly);
        } else if p.consume_keyword("READ WRITE") {
            modes.push(TransactionMode::ReadWrite);
        } else {
            break;
        }
        p.consume(TokenKind::Comma);
    }
    Ok(modes)
}

/// `COMMIT [WORK | TRANSACTION]`.
pub(super) fn commit_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("COMMIT", "commit")?;
    let _ = p.consume_keyword("WORK") || p.consume_keyword("TRANSACTION");
    Ok(Statement::Commit)
}

/// `ROLLBACK [WORK | TRANSACTION]`.
pub(super) fn rollback_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("ROLLBACK", "rollback")?;
    let _ = p.consume_keyword("WORK") || p.consume_keyword("TRANSACTION");
    Ok(Statement::Rollback)
}

/// `ROLLBACK TO [SAVEPOINT] name`.
pub(super) fn rollback_to_statement(p: &mut Parser) -> Result<Statement> {
    p.advance();
    Ok(Statement::RollbackSavepoint(p.expect_identifier("rollback")?))
}

/// `SAVEPOINT name`.
pub(super) fn savepoint_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("SAVEPOINT", "savepoint")?;
    Ok(Statement::Savepoint(p.expect_identifier("savepoint")?))
}

/// `RELEASE SAVEPOINT name`.
pub(super) fn release_savepoint_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("RELEASE SAVEPOINT", "savepoint")?;
    Ok(Statement::ReleaseSavepoint(
        p.expect_identifier("savepoint")?,
    ))
}

/// `GRANT privileges ON [kind] object TO grantees [WITH GRANT OPTION]`.
pub(super) fn grant_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("GRANT", "grant")?;
    let privileges = parse_privileges(p)?;
    let (object_kind, object) = parse_object(p, "grant")?;
    p.expect_keyword("TO", "grant")?;
    let grantees = parse_grantees(p, "grant")?;
    let grant_option = p.consume_keyword("WITH GRANT OPTION");
    Ok(Statement::Grant(Box::new(Permission {
        privileges,
        object_kind,
        object,
        grantees,
        grant_option,
        behavior: None,
    })))
}

/// `REVOKE [GRANT OPTION FOR] privileges ON [kind] object FROM grantees
/// [CASCADE | RESTRICT]`.
pub(super) fn revoke_statement(p: &mut Parser) -> Result<Statement> {
    p.expect_keyword("REVOKE", "revoke")?;
    let grant_option = p.consume_keyword("GRANT OPTION FOR");
    let privileges = parse_privileges(p)?;
    let (object_kind, object) = parse_object(p, "revoke")?;
    p.expect_keyword("FROM", "revoke")?;
    let grantees = parse_grantees(p, "revoke")?;
    let behavior = parse_drop_behavior(p);
    Ok(Statement::Revoke(Box::new(Permission {
        privileges,
        object_kind,
        object,
        grantees,
        grant_option,
        behavior,
    })))
}

/// Privileges are keywords (`SELECT`, `ALL PRIVILEGES`) or plain words
/// (`USAGE`); both are normalized to upper case.
fn parse_privileges(p: &mut Parser) -> Result<Vec<String>> {
    let mut privileges = Vec::new();
    loop {
        let token = p.current();
        if !(token.is_keyword() || token.kind == TokenKind::Identifier) || token.is_keyword_literal("ON")
        {
            return Err(p.unexpected("permission", "a privilege"));
        }
        privileges.push(p.advance().literal.to_uppercase());
        if !p.consume(TokenKind::Comma) {
            return Ok(privileges);
        }
    }
}

fn parse_object(
    p: &mut Parser,
    context: &'static str,
) -> Result<(Option<String>, Statement)> {
    p.expect_keyword("ON", context)?;
    let kind = if p.check_any_keyword(&["TABLE", "VIEW", "PROCEDURE"]) {
        Some(p.advance().literal)
    } else {
        None
    };
    Ok((kind, p.parse_name(context)?))
}

fn parse_grantees(p: &mut Parser, context: &'static str) -> Result<Vec<String>> {
    let mut grantees = vec![p.expect_identifier(context)?];
    while p.consume(TokenKind::Comma) {
        grantees.push(p.expect_identifier(context)?);
    }
    Ok(grantees)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(sql: &str) -> Statement {
        Parser::new(sql).parse().unwrap().unwrap()
    }

    #[test]
    fn test_transaction_modes() {
        assert_eq!(
            parse("START TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY"),
            Statement::StartTransaction(vec![
                TransactionMode::IsolationLevel("REPEATABLE READ".into()),
                TransactionMode::ReadOnly,
            ])
        );
        assert_eq!(
            parse("BEGIN TRANSACTION READ WRITE"),
            Statement::StartTransaction(vec![TransactionMode::ReadWrite])
        );
    }

    #[test]
    fn test_set_transaction_requires_a_mode() {
        let err = Parser::new("SET TRANSACTION").parse().unwrap_err();
        assert_eq!(err.as_syntax().unwrap().context, "transaction");
    }

    #[test]
    fn test_savepoints() {
        assert_eq!(parse("SAVEPOINT s1"), Statement::Savepoint("s1".into()));
        assert_eq!(
            parse("ROLLBACK TO s1"),
            Statement::RollbackSavepoint("s1".into())
        );
        assert_eq!(
            parse("ROLLBACK TO SAVEPOINT s1"),
            Statement::RollbackSavepoint("s1".into())
        );
        assert_eq!(
            parse("RELEASE SAVEPOINT s1"),
            Statement::ReleaseSavepoint("s1".into())
        );
        assert_eq!(parse("COMMIT WORK"), Statement::Commit);
        assert_eq!(parse("ROLLBACK"), Statement::Rollback);
    }

    #[test]
    fn test_grant_and_revoke() {
        let Statement::Grant(grant) =
            parse("GRANT SELECT, INSERT ON TABLE app.users TO alice, bob WITH GRANT OPTION")
        else {
            panic!("expected GRANT");
        };
        assert_eq!(grant.privileges, vec!["SELECT", "INSERT"]);
        assert_eq!(grant.object_kind.as_deref(), Some("TABLE"));
        assert_eq!(grant.grantees, vec!["alice", "bob"]);
        assert!(grant.grant_option);

        let Statement::Revoke(revoke) =
            parse("REVOKE GRANT OPTION FOR ALL PRIVILEGES ON users FROM alice CASCADE")
        else {
            panic!("expected REVOKE");
        };
        assert!(revoke.grant_option);
        assert_eq!(revoke.privileges, vec!["ALL PRIVILEGES"]);
        assert_eq!(revoke.behavior, Some(crate::ast::DropBehavior::Cascade));
    }
}
