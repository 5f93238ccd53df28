//! Expression-level AST types.
//!
//! Expressions are not a separate type: every node is a [`Statement`], and
//! the structs here are the payloads of its expression variants.

use super::Statement;

/// What kind of literal a [`Statement::Value`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Numeric literal, kept as written.
    Number,
    /// Single-quoted string, quotes included.
    String,
    /// `NULL`, `TRUE`, `FALSE`, `DEFAULT` or `UNKNOWN`.
    Constant,
    /// `?`, `:name` or `$n`.
    Placeholder,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Placement of nulls in an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    /// `NULLS FIRST`.
    First,
    /// `NULLS LAST`.
    Last,
}

impl NullsOrder {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// A function call such as `COUNT(DISTINCT a) FILTER (WHERE b) OVER w`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The (possibly qualified) function name.
    pub name: Vec<String>,
    /// Whether `DISTINCT` preceded the arguments.
    pub distinct: bool,
    /// The arguments; `COUNT(*)` has a single `*` name.
    pub args: Vec<Statement>,
    /// The `FILTER (WHERE ...)` condition.
    pub filter: Option<Box<Statement>>,
    /// The `OVER` clause: a [`Statement::Window`] or a window [`Statement::Name`].
    pub over: Option<Box<Statement>>,
}

/// A `CASE` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    /// The operand of a simple `CASE x WHEN ...`.
    pub operand: Option<Box<Statement>>,
    /// The `WHEN ... THEN ...` arms, in source order.
    pub whens: Vec<When>,
    /// The `ELSE` result.
    pub otherwise: Option<Box<Statement>>,
}

/// One `WHEN condition THEN result` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct When {
    /// The condition (or the compared value in a simple `CASE`).
    pub condition: Statement,
    /// The result.
    pub result: Statement,
}

/// The condition attached to a join.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    /// `ON <predicate>`.
    On(Box<Statement>),
    /// `USING (a, b)`.
    Using(Vec<String>),
}

/// A join against the preceding table references.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The join keyword as written, e.g. `LEFT OUTER JOIN`.
    pub kind: String,
    /// The joined table reference.
    pub table: Box<Statement>,
    /// The join condition, absent for `CROSS JOIN` and `NATURAL JOIN`.
    pub condition: Option<JoinCondition>,
}

/// A window specification, as used by `OVER (...)` and `WINDOW w AS (...)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Window {
    /// Name of an existing window this one refines.
    pub base: Option<String>,
    /// `PARTITION BY` expressions.
    pub partition_by: Vec<Statement>,
    /// `ORDER BY` items.
    pub order_by: Vec<Statement>,
    /// The frame clause.
    pub frame: Option<FrameSpec>,
}

/// A named window from a `WINDOW` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDefinition {
    /// The window name.
    pub name: String,
    /// Its specification.
    pub window: Window,
}

/// Frame units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUnit {
    /// `ROWS`.
    Rows,
    /// `RANGE`.
    Range,
    /// `GROUPS`.
    Groups,
}

impl FrameUnit {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Groups => "GROUPS",
        }
    }
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBound {
    /// `CURRENT ROW`.
    CurrentRow,
    /// `UNBOUNDED PRECEDING`.
    UnboundedPreceding,
    /// `UNBOUNDED FOLLOWING`.
    UnboundedFollowing,
    /// `<expr> PRECEDING`.
    Preceding(Box<Statement>),
    /// `<expr> FOLLOWING`.
    Following(Box<Statement>),
}

/// The `EXCLUDE` option of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameExclusion {
    /// `EXCLUDE CURRENT ROW`.
    CurrentRow,
    /// `EXCLUDE GROUP`.
    Group,
    /// `EXCLUDE TIES`.
    Ties,
    /// `EXCLUDE NO OTHERS`.
    NoOthers,
}

impl FrameExclusion {
    /// Returns the SQL representation of what is excluded.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentRow => "CURRENT ROW",
            Self::Group => "GROUP",
            Self::Ties => "TIES",
            Self::NoOthers => "NO OTHERS",
        }
    }
}

/// A window frame: `ROWS BETWEEN 1 PRECEDING AND CURRENT ROW EXCLUDE TIES`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpec {
    /// Frame units.
    pub unit: FrameUnit,
    /// The start bound (the only bound without `BETWEEN`).
    pub start: FrameBound,
    /// The end bound of a `BETWEEN` frame.
    pub end: Option<FrameBound>,
    /// The `EXCLUDE` option.
    pub exclude: Option<FrameExclusion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(OrderDirection::Desc.as_str(), "DESC");
        assert_eq!(NullsOrder::First.as_str(), "NULLS FIRST");
        assert_eq!(FrameUnit::Groups.as_str(), "GROUPS");
        assert_eq!(FrameExclusion::NoOthers.as_str(), "NO OTHERS");
    }

    #[test]
    fn test_window_default_is_empty() {
        let window = Window::default();
        assert!(window.base.is_none());
        assert!(window.partition_by.is_empty());
        assert!(window.frame.is_none());
    }
}
