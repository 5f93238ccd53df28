//! The statement sum type and the payloads of its query, DML, procedural
//! and transaction variants.

use super::ddl::{AlterTable, CreateProcedure, CreateTable, CreateView, DropStatement};
use super::expression::{Call, Case, Join, NullsOrder, OrderDirection, ValueKind, Window};
use super::WindowDefinition;

/// A parsed SQL node.
///
/// Both statements and expressions are `Statement`s, so a consumer can walk
/// any subtree with one exhaustive `match`.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    // Expressions
    /// A dotted identifier; the last part may be `*`.
    Name {
        /// The parts, quoted identifiers keeping their quotes.
        parts: Vec<String>,
    },
    /// A literal.
    Value {
        /// The literal text as written (strings keep their quotes).
        literal: String,
        /// What kind of literal it is.
        kind: ValueKind,
    },
    /// An aliased expression or table reference.
    Alias {
        /// The aliased node.
        statement: Box<Statement>,
        /// The alias.
        alias: String,
        /// Whether `AS` was written.
        explicit: bool,
    },
    /// A prefix operator (`-`, `+`, `~`).
    Unary {
        /// The operator.
        op: String,
        /// The operand.
        operand: Box<Statement>,
    },
    /// A binary operator, symbolic or keyword (`AND`, `LIKE`, `SIMILAR TO`).
    Binary {
        /// Left operand.
        left: Box<Statement>,
        /// The operator text; keyword operators are upper case.
        op: String,
        /// Right operand.
        right: Box<Statement>,
    },
    /// `subject BETWEEN lower AND upper`.
    Between {
        /// Tested value.
        subject: Box<Statement>,
        /// Lower bound.
        lower: Box<Statement>,
        /// Upper bound.
        upper: Box<Statement>,
    },
    /// `subject IN set`, where the set is a group, subquery or name.
    In {
        /// Tested value.
        subject: Box<Statement>,
        /// The set.
        set: Box<Statement>,
    },
    /// `subject IS [NOT] target`.
    Is {
        /// Tested value.
        subject: Box<Statement>,
        /// Whether `NOT` was written.
        not: bool,
        /// The constant compared against.
        target: Box<Statement>,
    },
    /// Logical negation.
    Not(Box<Statement>),
    /// `EXISTS (subquery)`.
    Exists(Box<Statement>),
    /// `statement COLLATE collation`.
    Collate {
        /// The collated expression.
        statement: Box<Statement>,
        /// The collation name.
        collation: String,
    },
    /// `CAST(statement AS type_name)`.
    Cast {
        /// The cast expression.
        statement: Box<Statement>,
        /// The target type as written.
        type_name: String,
    },
    /// A parenthesized node.
    Group(Box<Statement>),
    /// A function call.
    Call(Call),
    /// `ROW(a, b)`.
    Row(Vec<Statement>),
    /// An ordered list of values.
    List(Vec<Statement>),
    /// A `CASE` expression.
    Case(Case),
    /// An ordering item.
    Order {
        /// The ordered expression.
        statement: Box<Statement>,
        /// `ASC` or `DESC`.
        direction: Option<OrderDirection>,
        /// `NULLS FIRST` or `NULLS LAST`.
        nulls: Option<NullsOrder>,
    },
    /// A join in a table list.
    Join(Join),
    /// An inline window specification.
    Window(Window),

    // Queries
    /// `WITH [RECURSIVE] ctes body`.
    With(With),
    /// A `SELECT` statement.
    Select(Box<Select>),
    /// `left UNION right`.
    Union(Compound),
    /// `left INTERSECT right`.
    Intersect(Compound),
    /// `left EXCEPT right`.
    Except(Compound),
    /// `VALUES (..), (..)`; each row is a group.
    Values(Vec<Statement>),

    // Data manipulation
    /// An `INSERT` statement.
    Insert(Box<Insert>),
    /// An `UPDATE` statement.
    Update(Box<Update>),
    /// A `DELETE` statement.
    Delete(Box<Delete>),
    /// A `MERGE` statement.
    Merge(Box<Merge>),
    /// `TRUNCATE [TABLE] tables`.
    Truncate(Vec<Statement>),

    // Data definition
    /// `CREATE TABLE`.
    CreateTable(Box<CreateTable>),
    /// `ALTER TABLE`.
    AlterTable(Box<AlterTable>),
    /// `CREATE VIEW`.
    CreateView(Box<CreateView>),
    /// `DROP TABLE`.
    DropTable(DropStatement),
    /// `DROP VIEW`.
    DropView(DropStatement),
    /// `CREATE PROCEDURE`.
    CreateProcedure(Box<CreateProcedure>),

    // Procedural
    /// `DECLARE names type [DEFAULT value]`.
    Declare {
        /// Declared variable names.
        names: Vec<String>,
        /// Their type.
        type_name: String,
        /// Initial value.
        default: Option<Box<Statement>>,
    },
    /// `SET target = value`.
    Set(Box<Assignment>),
    /// `IF ... END IF`.
    If(If),
    /// `WHILE condition DO body END WHILE`.
    While {
        /// Loop condition.
        condition: Box<Statement>,
        /// Loop body.
        body: Vec<Statement>,
    },
    /// `RETURN [value]`.
    Return(Option<Box<Statement>>),
    /// `BEGIN body END`.
    Block(Vec<Statement>),

    // Transactions
    /// `START TRANSACTION`, `BEGIN [TRANSACTION]`.
    StartTransaction(Vec<TransactionMode>),
    /// `SET TRANSACTION modes`.
    SetTransaction(Vec<TransactionMode>),
    /// `SAVEPOINT name`.
    Savepoint(String),
    /// `RELEASE SAVEPOINT name`.
    ReleaseSavepoint(String),
    /// `ROLLBACK TO [SAVEPOINT] name`.
    RollbackSavepoint(String),
    /// `COMMIT`.
    Commit,
    /// `ROLLBACK`.
    Rollback,

    // Permissions
    /// `GRANT`.
    Grant(Box<Permission>),
    /// `REVOKE`.
    Revoke(Box<Permission>),

    /// A statement with the comments around it.
    Commented {
        /// Comment lines preceding the statement.
        leading: Vec<String>,
        /// A comment on the same line after the terminator.
        trailing: Option<String>,
        /// The statement itself.
        statement: Box<Statement>,
    },
}

impl Statement {
    /// Creates a dotted name.
    #[must_use]
    pub fn name<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Name {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a numeric literal.
    #[must_use]
    pub fn number(literal: impl Into<String>) -> Self {
        Self::Value {
            literal: literal.into(),
            kind: ValueKind::Number,
        }
    }

    /// Creates a string literal; `literal` includes its quotes.
    #[must_use]
    pub fn string(literal: impl Into<String>) -> Self {
        Self::Value {
            literal: literal.into(),
            kind: ValueKind::String,
        }
    }

    /// Creates a constant such as `NULL` or `TRUE`.
    #[must_use]
    pub fn constant(literal: impl Into<String>) -> Self {
        Self::Value {
            literal: literal.into(),
            kind: ValueKind::Constant,
        }
    }

    /// Creates a binary node.
    #[must_use]
    pub fn binary(left: Self, op: impl Into<String>, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        }
    }

    /// Builds a list, collapsing a single element to itself.
    #[must_use]
    pub fn list(mut items: Vec<Self>) -> Self {
        if items.len() == 1 {
            if let Some(item) = items.pop() {
                return item;
            }
        }
        Self::List(items)
    }

    /// Returns the sole element of a one-item list, otherwise `self`.
    #[must_use]
    pub fn as_statement(&self) -> &Self {
        match self {
            Self::List(items) if items.len() == 1 => &items[0],
            _ => self,
        }
    }

    /// Owned counterpart of [`as_statement`](Self::as_statement).
    #[must_use]
    pub fn into_statement(self) -> Self {
        match self {
            Self::List(items) => Self::list(items),
            other => other,
        }
    }

    /// Returns true for `AND`/`OR` binaries (logical connectives).
    #[must_use]
    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Binary { op, .. } if op == "AND" || op == "OR")
    }

    /// Returns true for the query forms usable as a subquery.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(
            self,
            Self::Select(_)
                | Self::With(_)
                | Self::Union(_)
                | Self::Intersect(_)
                | Self::Except(_)
                | Self::Values(_)
        )
    }

    /// Strips a [`Statement::Commented`] wrapper.
    #[must_use]
    pub fn uncommented(&self) -> &Self {
        match self {
            Self::Commented { statement, .. } => statement.uncommented(),
            other => other,
        }
    }
}

/// One common table expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    /// The CTE name.
    pub name: String,
    /// Optional column list.
    pub columns: Vec<String>,
    /// `MATERIALIZED` / `NOT MATERIALIZED` hint.
    pub materialization: Option<Materialization>,
    /// The body, usually a [`Statement::Select`].
    pub body: Box<Statement>,
}

/// Materialization hint of a CTE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialization {
    /// `MATERIALIZED`.
    Materialized,
    /// `NOT MATERIALIZED`.
    NotMaterialized,
}

/// `WITH [RECURSIVE] cte, ... body`.
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    /// Whether `RECURSIVE` was written.
    pub recursive: bool,
    /// The CTEs in declaration order.
    pub ctes: Vec<Cte>,
    /// The final statement.
    pub body: Box<Statement>,
}

/// How a row limit was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStyle {
    /// `LIMIT n [OFFSET m]`.
    Limit,
    /// `LIMIT n, m`.
    Comma,
    /// `[OFFSET m ROWS] [FETCH FIRST n ROWS ONLY]`.
    Fetch,
}

/// Row count and offset of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    /// Maximum number of rows.
    pub count: Option<Statement>,
    /// Rows to skip.
    pub offset: Option<Statement>,
    /// Which syntax was used.
    pub style: LimitStyle,
}

/// A `SELECT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Whether `DISTINCT` was written.
    pub distinct: bool,
    /// The select list.
    pub columns: Vec<Statement>,
    /// Table references and joins, in source order.
    pub tables: Vec<Statement>,
    /// `WHERE` condition.
    pub where_clause: Option<Statement>,
    /// `GROUP BY` expressions.
    pub group_by: Vec<Statement>,
    /// `HAVING` condition.
    pub having: Option<Statement>,
    /// `WINDOW` definitions.
    pub windows: Vec<WindowDefinition>,
    /// `ORDER BY` items.
    pub order_by: Vec<Statement>,
    /// Row limit.
    pub limit: Option<Limit>,
}

/// The operands of a set operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    /// Left query.
    pub left: Box<Statement>,
    /// Right query.
    pub right: Box<Statement>,
    /// `ALL` was written.
    pub all: bool,
    /// `DISTINCT` was written.
    pub distinct: bool,
}

/// `target op value` in `SET` clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The assigned column or variable.
    pub target: Statement,
    /// `=` or a compound operator such as `+=`.
    pub op: String,
    /// The new value.
    pub value: Statement,
}

/// Where inserted rows come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// A `VALUES` list or a query.
    Query(Box<Statement>),
    /// `DEFAULT VALUES`.
    DefaultValues,
}

/// What an upsert does on conflict.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertAction {
    /// `DO NOTHING`.
    Nothing,
    /// `DO UPDATE SET ... [WHERE ...]`.
    Update {
        /// The assignments.
        assignments: Vec<Assignment>,
        /// Optional filter.
        where_clause: Option<Statement>,
    },
}

/// `ON CONFLICT [(columns)] DO ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct Upsert {
    /// Conflict target columns.
    pub target: Vec<String>,
    /// The action.
    pub action: UpsertAction,
}

/// An `INSERT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Target table.
    pub table: Statement,
    /// Target columns.
    pub columns: Vec<String>,
    /// Row source.
    pub source: InsertSource,
    /// Upsert clause.
    pub upsert: Option<Upsert>,
    /// `RETURNING` list.
    pub returning: Vec<Statement>,
}

/// An `UPDATE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Target table reference.
    pub table: Statement,
    /// `SET` assignments.
    pub assignments: Vec<Assignment>,
    /// `FROM` table references.
    pub from: Vec<Statement>,
    /// `WHERE` condition.
    pub where_clause: Option<Statement>,
    /// `RETURNING` list.
    pub returning: Vec<Statement>,
}

/// A `DELETE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Target table reference.
    pub table: Statement,
    /// `USING` table references.
    pub using: Vec<Statement>,
    /// `WHERE` condition.
    pub where_clause: Option<Statement>,
    /// `RETURNING` list.
    pub returning: Vec<Statement>,
}

/// The action of a `WHEN [NOT] MATCHED` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeAction {
    /// `UPDATE SET ...`.
    Update(Vec<Assignment>),
    /// `DELETE`.
    Delete,
    /// `INSERT [(columns)] VALUES (...)`.
    Insert {
        /// Target columns.
        columns: Vec<String>,
        /// Inserted values.
        values: Vec<Statement>,
    },
    /// `DO NOTHING`.
    DoNothing,
}

/// `WHEN [NOT] MATCHED [AND condition] THEN action`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeClause {
    /// `MATCHED` versus `NOT MATCHED`.
    pub matched: bool,
    /// Extra `AND` condition.
    pub condition: Option<Statement>,
    /// The action.
    pub action: MergeAction,
}

/// A `MERGE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    /// Target table reference.
    pub target: Statement,
    /// Source table reference.
    pub source: Statement,
    /// The `ON` join condition.
    pub condition: Statement,
    /// The matched/not-matched clauses.
    pub clauses: Vec<MergeClause>,
}

/// `ELSEIF condition THEN body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    /// Branch condition.
    pub condition: Statement,
    /// Branch body.
    pub body: Vec<Statement>,
}

/// `IF condition THEN ... [ELSEIF ...] [ELSE ...] END IF`.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    /// The first condition.
    pub condition: Box<Statement>,
    /// Statements run when it holds.
    pub then: Vec<Statement>,
    /// `ELSEIF` branches.
    pub else_ifs: Vec<ElseIf>,
    /// `ELSE` body.
    pub otherwise: Option<Vec<Statement>>,
}

/// A transaction characteristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionMode {
    /// `ISOLATION LEVEL <level>`, level upper case.
    IsolationLevel(String),
    /// `READ ONLY`.
    ReadOnly,
    /// `READ WRITE`.
    ReadWrite,
}

/// `CASCADE` or `RESTRICT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropBehavior {
    /// `CASCADE`.
    Cascade,
    /// `RESTRICT`.
    Restrict,
}

impl DropBehavior {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
        }
    }
}

/// The body of a `GRANT` or `REVOKE`.
#[derive(Debug, Clone, PartialEq)]
pub struct Permission {
    /// Privileges, upper case (`SELECT`, `ALL PRIVILEGES`, ...).
    pub privileges: Vec<String>,
    /// Object kind written before the name, e.g. `TABLE`.
    pub object_kind: Option<String>,
    /// The object.
    pub object: Statement,
    /// Grantees (or revokees).
    pub grantees: Vec<String>,
    /// `WITH GRANT OPTION` / `GRANT OPTION FOR`.
    pub grant_option: bool,
    /// `CASCADE` / `RESTRICT` on revoke.
    pub behavior: Option<DropBehavior>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_collapses_singleton() {
        let one = Statement::list(vec![Statement::number("1")]);
        assert_eq!(one, Statement::number("1"));
        let two = Statement::list(vec![Statement::number("1"), Statement::number("2")]);
        assert!(matches!(two, Statement::List(ref items) if items.len() == 2));
    }

    #[test]
    fn test_as_statement() {
        let list = Statement::List(vec![Statement::name(["a"])]);
        assert_eq!(list.as_statement(), &Statement::name(["a"]));
        assert_eq!(list.into_statement(), Statement::name(["a"]));
        let empty = Statement::List(vec![]);
        assert_eq!(empty.as_statement(), &Statement::List(vec![]));
    }

    #[test]
    fn test_is_relation() {
        let and = Statement::binary(Statement::name(["a"]), "AND", Statement::name(["b"]));
        let eq = Statement::binary(Statement::name(["a"]), "=", Statement::number("1"));
        assert!(and.is_relation());
        assert!(!eq.is_relation());
        assert!(!Statement::name(["a"]).is_relation());
    }

    #[test]
    fn test_uncommented() {
        let stmt = Statement::Commented {
            leading: vec!["-- x".into()],
            trailing: None,
            statement: Box::new(Statement::Commit),
        };
        assert_eq!(stmt.uncommented(), &Statement::Commit);
    }
}
