//! Abstract Syntax Tree (AST) types for SQL scripts.
//!
//! The tree is a single closed enum, [`Statement`], covering expressions,
//! queries, DML, DDL, procedural code and transaction control. Every node
//! implements [`std::fmt::Display`], rendering compact SQL that parses back
//! to the same tree.

mod ddl;
mod display;
mod expression;
mod statement;

pub use ddl::{
    AlterTable, AlterTableAction, ColumnDefinition, Constraint, ConstraintKind, CreateProcedure,
    CreateTable, CreateView, DropStatement, ParameterMode, ProcedureParameter, ReferentialAction,
};
pub use expression::{
    Call, Case, FrameBound, FrameExclusion, FrameSpec, FrameUnit, Join, JoinCondition, NullsOrder,
    OrderDirection, ValueKind, When, Window, WindowDefinition,
};
pub use statement::{
    Assignment, Compound, Cte, Delete, DropBehavior, ElseIf, If, Insert, InsertSource, Limit,
    LimitStyle, Materialization, Merge, MergeAction, MergeClause, Permission, Select, Statement,
    TransactionMode, Update, Upsert, UpsertAction, With,
};
