//! Data definition AST types: tables, views, constraints and procedures.

use super::{DropBehavior, Statement};

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    /// `CASCADE`.
    Cascade,
    /// `RESTRICT`.
    Restrict,
    /// `SET NULL`.
    SetNull,
    /// `SET DEFAULT`.
    SetDefault,
    /// `NO ACTION`.
    NoAction,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// What a constraint enforces.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintKind {
    /// `PRIMARY KEY [(columns)]`.
    PrimaryKey(Vec<String>),
    /// `[FOREIGN KEY (columns)] REFERENCES table [(columns)] [ON ...]`.
    ForeignKey {
        /// Referencing columns; empty at column level.
        columns: Vec<String>,
        /// Referenced table.
        table: Statement,
        /// Referenced columns.
        referenced: Vec<String>,
        /// `ON DELETE` action.
        on_delete: Option<ReferentialAction>,
        /// `ON UPDATE` action.
        on_update: Option<ReferentialAction>,
    },
    /// `UNIQUE [(columns)]`.
    Unique(Vec<String>),
    /// `NOT NULL`.
    NotNull,
    /// `NULL`.
    Null,
    /// `CHECK (condition)`.
    Check(Box<Statement>),
    /// `DEFAULT value`.
    Default(Box<Statement>),
    /// `GENERATED ALWAYS AS (expr) [STORED | VIRTUAL]`.
    Generated {
        /// The generating expression.
        expression: Box<Statement>,
        /// `STORED` (true) or `VIRTUAL` (false), if written.
        stored: Option<bool>,
    },
}

/// A column or table constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// `CONSTRAINT name`.
    pub name: Option<String>,
    /// The constraint itself.
    pub kind: ConstraintKind,
}

/// A column in `CREATE TABLE` or `ALTER TABLE ... ADD COLUMN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Declared type as written.
    pub type_name: Option<String>,
    /// Column constraints.
    pub constraints: Vec<Constraint>,
}

/// `CREATE [TEMPORARY] TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// `TEMPORARY` was written.
    pub temporary: bool,
    /// `IF NOT EXISTS` was written.
    pub if_not_exists: bool,
    /// Table name.
    pub name: Statement,
    /// Column definitions.
    pub columns: Vec<ColumnDefinition>,
    /// Table constraints.
    pub constraints: Vec<Constraint>,
    /// `AS query` body.
    pub as_query: Option<Box<Statement>>,
}

/// The change made by `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    /// `ADD [COLUMN] definition`.
    AddColumn(ColumnDefinition),
    /// `ADD constraint`.
    AddConstraint(Constraint),
    /// `DROP COLUMN name`.
    DropColumn(String),
    /// `DROP CONSTRAINT name`.
    DropConstraint(String),
    /// `RENAME COLUMN from TO to`.
    RenameColumn {
        /// Old name.
        from: String,
        /// New name.
        to: String,
    },
    /// `RENAME CONSTRAINT from TO to`.
    RenameConstraint {
        /// Old name.
        from: String,
        /// New name.
        to: String,
    },
    /// `RENAME TO name`.
    RenameTo(String),
}

/// `ALTER TABLE name action`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTable {
    /// Table name.
    pub name: Statement,
    /// The change.
    pub action: AlterTableAction,
}

/// `CREATE [OR REPLACE] VIEW`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateView {
    /// `OR REPLACE` was written.
    pub or_replace: bool,
    /// View name.
    pub name: Statement,
    /// Column aliases.
    pub columns: Vec<String>,
    /// The view query.
    pub body: Statement,
}

/// `DROP {TABLE | VIEW} [IF EXISTS] names [CASCADE | RESTRICT]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DropStatement {
    /// `IF EXISTS` was written.
    pub if_exists: bool,
    /// Dropped objects.
    pub names: Vec<Statement>,
    /// Drop behavior.
    pub behavior: Option<DropBehavior>,
}

/// Direction of a procedure parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterMode {
    /// `IN`.
    In,
    /// `OUT`.
    Out,
    /// `INOUT`.
    InOut,
}

impl ParameterMode {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::InOut => "INOUT",
        }
    }
}

/// One parameter of `CREATE PROCEDURE`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureParameter {
    /// Declared mode.
    pub mode: Option<ParameterMode>,
    /// Parameter name (may be an `@name` macro).
    pub name: String,
    /// Declared type.
    pub type_name: String,
    /// Default value.
    pub default: Option<Statement>,
}

/// `CREATE [OR REPLACE] PROCEDURE name (params) [AS] BEGIN ... END`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProcedure {
    /// `OR REPLACE` was written.
    pub or_replace: bool,
    /// Procedure name.
    pub name: Statement,
    /// Parameters.
    pub parameters: Vec<ProcedureParameter>,
    /// Body statements.
    pub body: Vec<Statement>,
}
