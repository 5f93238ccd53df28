//! Tests for CREATE, ALTER and DROP.

mod common;
use common::*;

use sqlfront_core::ast::{
    AlterTableAction, ConstraintKind, DropBehavior, ParameterMode, ReferentialAction,
};
use sqlfront_core::Statement;

fn name(parts: &[&str]) -> Statement {
    Statement::name(parts.iter().copied())
}

// ===================================================================
// CREATE TABLE
// ===================================================================

#[test]
fn create_table_with_column_constraints() {
    let Statement::CreateTable(create) = parse(
        "CREATE TABLE orders (\
           id INT PRIMARY KEY, \
           status TEXT DEFAULT 'new' NOT NULL, \
           total NUMERIC(10, 2) CHECK (total >= 0), \
           doubled INT GENERATED ALWAYS AS (total * 2) STORED)",
    ) else {
        panic!("expected CREATE TABLE");
    };
    assert_eq!(create.name, name(&["orders"]));
    assert!(create.constraints.is_empty());

    let kinds: Vec<Vec<ConstraintKind>> = create
        .columns
        .iter()
        .map(|c| c.constraints.iter().map(|k| k.kind.clone()).collect())
        .collect();
    assert_eq!(kinds[0], vec![ConstraintKind::PrimaryKey(vec![])]);
    assert_eq!(
        kinds[1],
        vec![
            ConstraintKind::Default(Box::new(Statement::string("'new'"))),
            ConstraintKind::NotNull,
        ]
    );
    assert!(matches!(kinds[2][0], ConstraintKind::Check(_)));
    assert!(matches!(
        kinds[3][0],
        ConstraintKind::Generated {
            stored: Some(true),
            ..
        }
    ));
    assert_eq!(create.columns[2].type_name.as_deref(), Some("NUMERIC(10, 2)"));
}

#[test]
fn create_table_with_table_constraints() {
    let Statement::CreateTable(create) = parse(
        "CREATE TABLE line_items (\
           order_id INT, \
           product_id INT, \
           PRIMARY KEY (order_id, product_id), \
           CONSTRAINT fk_order FOREIGN KEY (order_id) REFERENCES orders (id) \
             ON DELETE CASCADE ON UPDATE NO ACTION)",
    ) else {
        panic!("expected CREATE TABLE");
    };
    assert_eq!(create.columns.len(), 2);
    assert_eq!(
        create.constraints[0].kind,
        ConstraintKind::PrimaryKey(vec!["order_id".into(), "product_id".into()])
    );
    assert_eq!(create.constraints[1].name.as_deref(), Some("fk_order"));
    assert_eq!(
        create.constraints[1].kind,
        ConstraintKind::ForeignKey {
            columns: vec!["order_id".into()],
            table: name(&["orders"]),
            referenced: vec!["id".into()],
            on_delete: Some(ReferentialAction::Cascade),
            on_update: Some(ReferentialAction::NoAction),
        }
    );
}

#[test]
fn bad_referential_action() {
    assert_eq!(
        parse_err("CREATE TABLE t (a INT REFERENCES u ON DELETE nothing_here)").context,
        "references"
    );
}

#[test]
fn constraint_name_requires_a_constraint() {
    assert_eq!(
        parse_err("CREATE TABLE t (a INT, CONSTRAINT c)").context,
        "constraint"
    );
}

#[test]
fn create_table_missing_paren() {
    assert_eq!(parse_err("CREATE TABLE t (a INT").context, "create table");
}

// ===================================================================
// ALTER / VIEW / DROP
// ===================================================================

#[test]
fn alter_table_add_column_and_constraint() {
    let Statement::AlterTable(alter) = parse("ALTER TABLE t ADD COLUMN c INT NOT NULL") else {
        panic!("expected ALTER TABLE");
    };
    let AlterTableAction::AddColumn(column) = alter.action else {
        panic!("expected ADD COLUMN");
    };
    assert_eq!(column.name, "c");
    assert_eq!(column.constraints[0].kind, ConstraintKind::NotNull);

    let Statement::AlterTable(alter) = parse("ALTER TABLE t ADD CONSTRAINT u_a UNIQUE (a)") else {
        panic!("expected ALTER TABLE");
    };
    assert!(matches!(
        alter.action,
        AlterTableAction::AddConstraint(ref c) if c.name.as_deref() == Some("u_a")
    ));
}

#[test]
fn create_view_with_columns() {
    let Statement::CreateView(view) =
        parse("CREATE OR REPLACE VIEW active (id, email) AS SELECT id, email FROM users WHERE active")
    else {
        panic!("expected CREATE VIEW");
    };
    assert!(view.or_replace);
    assert_eq!(view.columns, vec!["id", "email"]);
    assert!(view.body.is_query());
}

#[test]
fn drop_table_list() {
    let Statement::DropTable(drop) = parse("DROP TABLE IF EXISTS a, s.b RESTRICT") else {
        panic!("expected DROP TABLE");
    };
    assert!(drop.if_exists);
    assert_eq!(drop.names, vec![name(&["a"]), name(&["s", "b"])]);
    assert_eq!(drop.behavior, Some(DropBehavior::Restrict));
}

// ===================================================================
// CREATE PROCEDURE
// ===================================================================

#[test]
fn procedure_body_holds_statements() {
    let Statement::CreateProcedure(procedure) = parse(
        "CREATE OR REPLACE PROCEDURE archive(INOUT @cutoff DATE) AS BEGIN \
           DELETE FROM events WHERE created < @cutoff; \
           SET @cutoff = NULL; \
         END",
    ) else {
        panic!("expected CREATE PROCEDURE");
    };
    assert!(procedure.or_replace);
    assert_eq!(procedure.parameters[0].mode, Some(ParameterMode::InOut));
    assert_eq!(procedure.parameters[0].name, "@cutoff");
    assert!(matches!(procedure.body[0], Statement::Delete(_)));
    assert!(matches!(procedure.body[1], Statement::Set(_)));
}

#[test]
fn procedure_without_end() {
    assert_eq!(
        parse_err("CREATE PROCEDURE p() BEGIN COMMIT;").context,
        "procedure"
    );
}

#[test]
fn round_trip_ddl() {
    for sql in [
        "CREATE TABLE IF NOT EXISTS s.users (id INT PRIMARY KEY, email VARCHAR(255) NOT NULL UNIQUE)",
        "CREATE TEMPORARY TABLE t AS SELECT a FROM u",
        "CREATE TABLE t (a INT REFERENCES u (id) ON DELETE SET DEFAULT, b INT NULL, CHECK (a <> b))",
        "CREATE TABLE t (a INT, b INT GENERATED ALWAYS AS (a + 1) VIRTUAL, UNIQUE (a, b))",
        "ALTER TABLE t ADD c TEXT DEFAULT 'x'",
        "ALTER TABLE t DROP CONSTRAINT c",
        "ALTER TABLE t RENAME CONSTRAINT a TO b",
        "CREATE VIEW v AS SELECT 1",
        "DROP VIEW IF EXISTS v, w CASCADE",
        "CREATE PROCEDURE p(IN a INT DEFAULT 1, OUT b INT) BEGIN SET b = a; END",
        "CREATE PROCEDURE empty() BEGIN END",
    ] {
        round_trip(sql);
    }
}
