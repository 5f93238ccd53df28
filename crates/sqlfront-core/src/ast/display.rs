//! SQL rendering via `fmt::Display` for AST nodes.
//!
//! Output is compact, single-line SQL with upper-case keywords. Parentheses
//! are explicit [`Statement::Group`] nodes, so rendering never has to
//! reason about precedence: `parse(stmt.to_string())` yields `stmt` again.

use std::fmt;

#[allow(clippy::wildcard_imports)]
use super::*;

fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn column_list(f: &mut fmt::Formatter<'_>, columns: &[String]) -> fmt::Result {
    f.write_str("(")?;
    comma_list(f, columns)?;
    f.write_str(")")
}

/// Writes each statement followed by `; `.
fn statement_list(f: &mut fmt::Formatter<'_>, body: &[Statement]) -> fmt::Result {
    for statement in body {
        write!(f, "{statement}; ")?;
    }
    Ok(())
}

fn returning(f: &mut fmt::Formatter<'_>, items: &[Statement]) -> fmt::Result {
    if !items.is_empty() {
        f.write_str(" RETURNING ")?;
        comma_list(f, items)?;
    }
    Ok(())
}

fn where_clause(f: &mut fmt::Formatter<'_>, condition: Option<&Statement>) -> fmt::Result {
    match condition {
        Some(condition) => write!(f, " WHERE {condition}"),
        None => Ok(()),
    }
}

impl fmt::Display for Statement {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name { parts } => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(part)?;
                }
                Ok(())
            }
            Self::Value { literal, .. } => f.write_str(literal),
            Self::Alias {
                statement,
                alias,
                explicit,
            } => {
                if *explicit {
                    write!(f, "{statement} AS {alias}")
                } else {
                    write!(f, "{statement} {alias}")
                }
            }
            Self::Unary { op, operand } => {
                if matches!(**operand, Self::Unary { .. }) {
                    write!(f, "{op} {operand}")
                } else {
                    write!(f, "{op}{operand}")
                }
            }
            Self::Binary { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::Between {
                subject,
                lower,
                upper,
            } => write!(f, "{subject} BETWEEN {lower} AND {upper}"),
            Self::In { subject, set } => write!(f, "{subject} IN {set}"),
            Self::Is {
                subject,
                not,
                target,
            } => {
                if *not {
                    write!(f, "{subject} IS NOT {target}")
                } else {
                    write!(f, "{subject} IS {target}")
                }
            }
            Self::Not(inner) => write!(f, "NOT {inner}"),
            Self::Exists(query) => write!(f, "EXISTS {query}"),
            Self::Collate {
                statement,
                collation,
            } => write!(f, "{statement} COLLATE {collation}"),
            Self::Cast {
                statement,
                type_name,
            } => write!(f, "CAST({statement} AS {type_name})"),
            Self::Group(inner) => write!(f, "({inner})"),
            Self::Call(call) => write!(f, "{call}"),
            Self::Row(items) => {
                f.write_str("ROW(")?;
                comma_list(f, items)?;
                f.write_str(")")
            }
            Self::List(items) => comma_list(f, items),
            Self::Case(case) => write!(f, "{case}"),
            Self::Order {
                statement,
                direction,
                nulls,
            } => {
                write!(f, "{statement}")?;
                if let Some(direction) = direction {
                    write!(f, " {}", direction.as_str())?;
                }
                if let Some(nulls) = nulls {
                    write!(f, " {}", nulls.as_str())?;
                }
                Ok(())
            }
            Self::Join(join) => write!(f, "{join}"),
            Self::Window(window) => write!(f, "({window})"),

            Self::With(with) => write!(f, "{with}"),
            Self::Select(select) => write!(f, "{select}"),
            Self::Union(compound) => compound.write(f, "UNION"),
            Self::Intersect(compound) => compound.write(f, "INTERSECT"),
            Self::Except(compound) => compound.write(f, "EXCEPT"),
            Self::Values(rows) => {
                f.write_str("VALUES ")?;
                comma_list(f, rows)
            }

            Self::Insert(insert) => write!(f, "{insert}"),
            Self::Update(update) => write!(f, "{update}"),
            Self::Delete(delete) => write!(f, "{delete}"),
            Self::Merge(merge) => write!(f, "{merge}"),
            Self::Truncate(tables) => {
                f.write_str("TRUNCATE TABLE ")?;
                comma_list(f, tables)
            }

            Self::CreateTable(create) => write!(f, "{create}"),
            Self::AlterTable(alter) => write!(f, "{alter}"),
            Self::CreateView(view) => write!(f, "{view}"),
            Self::DropTable(drop) => drop.write(f, "TABLE"),
            Self::DropView(drop) => drop.write(f, "VIEW"),
            Self::CreateProcedure(procedure) => write!(f, "{procedure}"),

            Self::Declare {
                names,
                type_name,
                default,
            } => {
                f.write_str("DECLARE ")?;
                comma_list(f, names)?;
                write!(f, " {type_name}")?;
                if let Some(default) = default {
                    write!(f, " DEFAULT {default}")?;
                }
                Ok(())
            }
            Self::Set(assignment) => write!(f, "SET {assignment}"),
            Self::If(branch) => write!(f, "{branch}"),
            Self::While { condition, body } => {
                write!(f, "WHILE {condition} DO ")?;
                statement_list(f, body)?;
                f.write_str("END WHILE")
            }
            Self::Return(value) => match value {
                Some(value) => write!(f, "RETURN {value}"),
                None => f.write_str("RETURN"),
            },
            Self::Block(body) => {
                f.write_str("BEGIN ")?;
                statement_list(f, body)?;
                f.write_str("END")
            }

            Self::StartTransaction(modes) => {
                f.write_str("START TRANSACTION")?;
                if !modes.is_empty() {
                    f.write_str(" ")?;
                    comma_list(f, modes)?;
                }
                Ok(())
            }
            Self::SetTransaction(modes) => {
                f.write_str("SET TRANSACTION ")?;
                comma_list(f, modes)
            }
            Self::Savepoint(name) => write!(f, "SAVEPOINT {name}"),
            Self::ReleaseSavepoint(name) => write!(f, "RELEASE SAVEPOINT {name}"),
            Self::RollbackSavepoint(name) => write!(f, "ROLLBACK TO SAVEPOINT {name}"),
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback => f.write_str("ROLLBACK"),

            Self::Grant(permission) => permission.write(f, true),
            Self::Revoke(permission) => permission.write(f, false),

            Self::Commented {
                leading,
                trailing,
                statement,
            } => {
                for line in leading {
                    writeln!(f, "{line}")?;
                }
                write!(f, "{statement}")?;
                // A trailing comment only attaches on the terminator's line.
                if let Some(trailing) = trailing {
                    write!(f, "; {trailing}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name.join("."))?;
        f.write_str("(")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        comma_list(f, &self.args)?;
        f.write_str(")")?;
        if let Some(filter) = &self.filter {
            write!(f, " FILTER (WHERE {filter})")?;
        }
        if let Some(over) = &self.over {
            write!(f, " OVER {over}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(operand) = &self.operand {
            write!(f, " {operand}")?;
        }
        for when in &self.whens {
            write!(f, " WHEN {} THEN {}", when.condition, when.result)?;
        }
        if let Some(otherwise) = &self.otherwise {
            write!(f, " ELSE {otherwise}")?;
        }
        f.write_str(" END")
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.table)?;
        match &self.condition {
            Some(JoinCondition::On(condition)) => write!(f, " ON {condition}"),
            Some(JoinCondition::Using(columns)) => {
                f.write_str(" USING ")?;
                column_list(f, columns)
            }
            None => Ok(()),
        }
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
            Self::Preceding(offset) => write!(f, "{offset} PRECEDING"),
            Self::Following(offset) => write!(f, "{offset} FOLLOWING"),
        }
    }
}

impl fmt::Display for FrameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit.as_str())?;
        match &self.end {
            Some(end) => write!(f, " BETWEEN {} AND {end}", self.start)?,
            None => write!(f, " {}", self.start)?,
        }
        if let Some(exclude) = self.exclude {
            write!(f, " EXCLUDE {}", exclude.as_str())?;
        }
        Ok(())
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(base) = &self.base {
            f.write_str(base)?;
            sep = " ";
        }
        if !self.partition_by.is_empty() {
            write!(f, "{sep}PARTITION BY ")?;
            comma_list(f, &self.partition_by)?;
            sep = " ";
        }
        if !self.order_by.is_empty() {
            write!(f, "{sep}ORDER BY ")?;
            comma_list(f, &self.order_by)?;
            sep = " ";
        }
        if let Some(frame) = &self.frame {
            write!(f, "{sep}{frame}")?;
        }
        Ok(())
    }
}

impl fmt::Display for WindowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS ({})", self.name, self.window)
    }
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" ")?;
            column_list(f, &self.columns)?;
        }
        f.write_str(" AS ")?;
        match self.materialization {
            Some(Materialization::Materialized) => f.write_str("MATERIALIZED ")?,
            Some(Materialization::NotMaterialized) => f.write_str("NOT MATERIALIZED ")?,
            None => {}
        }
        write!(f, "({})", self.body)
    }
}

impl fmt::Display for With {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        if self.recursive {
            f.write_str("RECURSIVE ")?;
        }
        comma_list(f, &self.ctes)?;
        write!(f, " {}", self.body)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            LimitStyle::Limit => {
                if let Some(count) = &self.count {
                    write!(f, "LIMIT {count}")?;
                }
                if let Some(offset) = &self.offset {
                    write!(f, " OFFSET {offset}")?;
                }
                Ok(())
            }
            LimitStyle::Comma => {
                if let (Some(count), Some(offset)) = (&self.count, &self.offset) {
                    write!(f, "LIMIT {count}, {offset}")?;
                }
                Ok(())
            }
            LimitStyle::Fetch => {
                if let Some(offset) = &self.offset {
                    write!(f, "OFFSET {offset} ROWS")?;
                    if self.count.is_some() {
                        f.write_str(" ")?;
                    }
                }
                if let Some(count) = &self.count {
                    write!(f, "FETCH FIRST {count} ROWS ONLY")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        comma_list(f, &self.columns)?;
        for (i, table) in self.tables.iter().enumerate() {
            if i == 0 {
                write!(f, " FROM {table}")?;
            } else if matches!(table, Statement::Join(_)) {
                write!(f, " {table}")?;
            } else {
                write!(f, ", {table}")?;
            }
        }
        where_clause(f, self.where_clause.as_ref())?;
        if !self.group_by.is_empty() {
            f.write_str(" GROUP BY ")?;
            comma_list(f, &self.group_by)?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        if !self.windows.is_empty() {
            f.write_str(" WINDOW ")?;
            comma_list(f, &self.windows)?;
        }
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            comma_list(f, &self.order_by)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " {limit}")?;
        }
        Ok(())
    }
}

impl Compound {
    fn write(&self, f: &mut fmt::Formatter<'_>, op: &str) -> fmt::Result {
        write!(f, "{} {op}", self.left)?;
        if self.all {
            f.write_str(" ALL")?;
        } else if self.distinct {
            f.write_str(" DISTINCT")?;
        }
        write!(f, " {}", self.right)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, self.op, self.value)
    }
}

impl fmt::Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table)?;
        if !self.columns.is_empty() {
            f.write_str(" ")?;
            column_list(f, &self.columns)?;
        }
        match &self.source {
            InsertSource::Query(query) => write!(f, " {query}")?,
            InsertSource::DefaultValues => f.write_str(" DEFAULT VALUES")?,
        }
        if let Some(upsert) = &self.upsert {
            f.write_str(" ON CONFLICT")?;
            if !upsert.target.is_empty() {
                f.write_str(" ")?;
                column_list(f, &upsert.target)?;
            }
            match &upsert.action {
                UpsertAction::Nothing => f.write_str(" DO NOTHING")?,
                UpsertAction::Update {
                    assignments,
                    where_clause: condition,
                } => {
                    f.write_str(" DO UPDATE SET ")?;
                    comma_list(f, assignments)?;
                    where_clause(f, condition.as_ref())?;
                }
            }
        }
        returning(f, &self.returning)
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {} SET ", self.table)?;
        comma_list(f, &self.assignments)?;
        if !self.from.is_empty() {
            f.write_str(" FROM ")?;
            comma_list(f, &self.from)?;
        }
        where_clause(f, self.where_clause.as_ref())?;
        returning(f, &self.returning)
    }
}

impl fmt::Display for Delete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if !self.using.is_empty() {
            f.write_str(" USING ")?;
            comma_list(f, &self.using)?;
        }
        where_clause(f, self.where_clause.as_ref())?;
        returning(f, &self.returning)
    }
}

impl fmt::Display for MergeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update(assignments) => {
                f.write_str("UPDATE SET ")?;
                comma_list(f, assignments)
            }
            Self::Delete => f.write_str("DELETE"),
            Self::Insert { columns, values } => {
                f.write_str("INSERT ")?;
                if !columns.is_empty() {
                    column_list(f, columns)?;
                    f.write_str(" ")?;
                }
                f.write_str("VALUES (")?;
                comma_list(f, values)?;
                f.write_str(")")
            }
            Self::DoNothing => f.write_str("DO NOTHING"),
        }
    }
}

impl fmt::Display for Merge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MERGE INTO {} USING {} ON {}",
            self.target, self.source, self.condition
        )?;
        for clause in &self.clauses {
            if clause.matched {
                f.write_str(" WHEN MATCHED")?;
            } else {
                f.write_str(" WHEN NOT MATCHED")?;
            }
            if let Some(condition) = &clause.condition {
                write!(f, " AND {condition}")?;
            }
            write!(f, " THEN {}", clause.action)?;
        }
        Ok(())
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey(columns) => {
                f.write_str("PRIMARY KEY")?;
                if !columns.is_empty() {
                    f.write_str(" ")?;
                    column_list(f, columns)?;
                }
                Ok(())
            }
            Self::ForeignKey {
                columns,
                table,
                referenced,
                on_delete,
                on_update,
            } => {
                if !columns.is_empty() {
                    f.write_str("FOREIGN KEY ")?;
                    column_list(f, columns)?;
                    f.write_str(" ")?;
                }
                write!(f, "REFERENCES {table}")?;
                if !referenced.is_empty() {
                    f.write_str(" ")?;
                    column_list(f, referenced)?;
                }
                if let Some(action) = on_delete {
                    write!(f, " ON DELETE {}", action.as_str())?;
                }
                if let Some(action) = on_update {
                    write!(f, " ON UPDATE {}", action.as_str())?;
                }
                Ok(())
            }
            Self::Unique(columns) => {
                f.write_str("UNIQUE")?;
                if !columns.is_empty() {
                    f.write_str(" ")?;
                    column_list(f, columns)?;
                }
                Ok(())
            }
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Null => f.write_str("NULL"),
            Self::Check(condition) => write!(f, "CHECK ({condition})"),
            Self::Default(value) => write!(f, "DEFAULT {value}"),
            Self::Generated { expression, stored } => {
                write!(f, "GENERATED ALWAYS AS ({expression})")?;
                match stored {
                    Some(true) => f.write_str(" STORED"),
                    Some(false) => f.write_str(" VIRTUAL"),
                    None => Ok(()),
                }
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(type_name) = &self.type_name {
            write!(f, " {type_name}")?;
        }
        for constraint in &self.constraints {
            write!(f, " {constraint}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(query) = &self.as_query {
            return write!(f, " AS {query}");
        }
        f.write_str(" (")?;
        comma_list(f, &self.columns)?;
        if !self.columns.is_empty() && !self.constraints.is_empty() {
            f.write_str(", ")?;
        }
        comma_list(f, &self.constraints)?;
        f.write_str(")")
    }
}

impl fmt::Display for AlterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} ", self.name)?;
        match &self.action {
            AlterTableAction::AddColumn(column) => write!(f, "ADD COLUMN {column}"),
            AlterTableAction::AddConstraint(constraint) => write!(f, "ADD {constraint}"),
            AlterTableAction::DropColumn(name) => write!(f, "DROP COLUMN {name}"),
            AlterTableAction::DropConstraint(name) => write!(f, "DROP CONSTRAINT {name}"),
            AlterTableAction::RenameColumn { from, to } => {
                write!(f, "RENAME COLUMN {from} TO {to}")
            }
            AlterTableAction::RenameConstraint { from, to } => {
                write!(f, "RENAME CONSTRAINT {from} TO {to}")
            }
            AlterTableAction::RenameTo(name) => write!(f, "RENAME TO {name}"),
        }
    }
}

impl fmt::Display for CreateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_replace {
            f.write_str("OR REPLACE ")?;
        }
        write!(f, "VIEW {}", self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" ")?;
            column_list(f, &self.columns)?;
        }
        write!(f, " AS {}", self.body)
    }
}

impl DropStatement {
    fn write(&self, f: &mut fmt::Formatter<'_>, object: &str) -> fmt::Result {
        write!(f, "DROP {object} ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        comma_list(f, &self.names)?;
        if let Some(behavior) = self.behavior {
            write!(f, " {}", behavior.as_str())?;
        }
        Ok(())
    }
}

impl fmt::Display for ProcedureParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(mode) = self.mode {
            write!(f, "{} ", mode.as_str())?;
        }
        write!(f, "{} {}", self.name, self.type_name)?;
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_replace {
            f.write_str("OR REPLACE ")?;
        }
        write!(f, "PROCEDURE {}(", self.name)?;
        comma_list(f, &self.parameters)?;
        f.write_str(") BEGIN ")?;
        statement_list(f, &self.body)?;
        f.write_str("END")
    }
}

impl fmt::Display for If {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN ", self.condition)?;
        statement_list(f, &self.then)?;
        for branch in &self.else_ifs {
            write!(f, "ELSEIF {} THEN ", branch.condition)?;
            statement_list(f, &branch.body)?;
        }
        if let Some(otherwise) = &self.otherwise {
            f.write_str("ELSE ")?;
            statement_list(f, otherwise)?;
        }
        f.write_str("END IF")
    }
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsolationLevel(level) => write!(f, "ISOLATION LEVEL {level}"),
            Self::ReadOnly => f.write_str("READ ONLY"),
            Self::ReadWrite => f.write_str("READ WRITE"),
        }
    }
}

impl Permission {
    fn write(&self, f: &mut fmt::Formatter<'_>, grant: bool) -> fmt::Result {
        if grant {
            f.write_str("GRANT ")?;
        } else {
            f.write_str("REVOKE ")?;
            if self.grant_option {
                f.write_str("GRANT OPTION FOR ")?;
            }
        }
        comma_list(f, &self.privileges)?;
        f.write_str(" ON ")?;
        if let Some(kind) = &self.object_kind {
            write!(f, "{kind} ")?;
        }
        write!(f, "{} {} ", self.object, if grant { "TO" } else { "FROM" })?;
        comma_list(f, &self.grantees)?;
        if grant && self.grant_option {
            f.write_str(" WITH GRANT OPTION")?;
        }
        if let Some(behavior) = self.behavior {
            write!(f, " {}", behavior.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(parts: &[&str]) -> Statement {
        Statement::name(parts.iter().copied())
    }

    #[test]
    fn test_display_name_and_values() {
        assert_eq!(name(&["t", "*"]).to_string(), "t.*");
        assert_eq!(Statement::string("'it''s'").to_string(), "'it''s'");
        assert_eq!(Statement::constant("NULL").to_string(), "NULL");
    }

    #[test]
    fn test_display_nested_unary() {
        let inner = Statement::Unary {
            op: "-".into(),
            operand: Box::new(Statement::number("1")),
        };
        let outer = Statement::Unary {
            op: "-".into(),
            operand: Box::new(inner),
        };
        assert_eq!(outer.to_string(), "- -1");
    }

    #[test]
    fn test_display_select_with_join() {
        let select = Select {
            distinct: false,
            columns: vec![name(&["*"])],
            tables: vec![
                name(&["a"]),
                Statement::Join(Join {
                    kind: "LEFT JOIN".into(),
                    table: Box::new(name(&["b"])),
                    condition: Some(JoinCondition::Using(vec!["id".into()])),
                }),
                name(&["c"]),
            ],
            where_clause: None,
            group_by: vec![],
            having: None,
            windows: vec![],
            order_by: vec![],
            limit: Some(Limit {
                count: Some(Statement::number("10")),
                offset: Some(Statement::number("5")),
                style: LimitStyle::Fetch,
            }),
        };
        assert_eq!(
            Statement::Select(Box::new(select)).to_string(),
            "SELECT * FROM a LEFT JOIN b USING (id), c OFFSET 5 ROWS FETCH FIRST 10 ROWS ONLY"
        );
    }

    #[test]
    fn test_display_frame() {
        let frame = FrameSpec {
            unit: FrameUnit::Rows,
            start: FrameBound::Preceding(Box::new(Statement::number("1"))),
            end: Some(FrameBound::CurrentRow),
            exclude: Some(FrameExclusion::Ties),
        };
        assert_eq!(
            frame.to_string(),
            "ROWS BETWEEN 1 PRECEDING AND CURRENT ROW EXCLUDE TIES"
        );
    }

    #[test]
    fn test_display_commented() {
        let stmt = Statement::Commented {
            leading: vec!["-- first".into()],
            trailing: Some("-- after".into()),
            statement: Box::new(Statement::Commit),
        };
        assert_eq!(stmt.to_string(), "-- first\nCOMMIT; -- after");
    }
}
