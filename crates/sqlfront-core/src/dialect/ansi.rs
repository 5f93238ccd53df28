//! The default dialect: ANSI SQL plus the common procedural extensions.

use super::Dialect;
use crate::lexer::KeywordTable;

/// Keyword phrases of the ANSI dialect, in lower case.
///
/// A phrase of several words lexes as one keyword token. Every word listed
/// here is reserved: it can only be used as a name when quoted.
pub const ANSI_KEYWORDS: &[&str] = &[
    // Queries
    "select",
    "from",
    "where",
    "having",
    "group by",
    "order by",
    "partition by",
    "window",
    "limit",
    "offset",
    "fetch first",
    "fetch next",
    "rows",
    "row",
    "range",
    "groups",
    "only",
    "distinct",
    "all",
    "as",
    "union",
    "intersect",
    "except",
    "values",
    "with",
    "recursive",
    "materialized",
    // Joins
    "join",
    "inner join",
    "left join",
    "left outer join",
    "right join",
    "right outer join",
    "full join",
    "full outer join",
    "cross join",
    "natural join",
    "on",
    "using",
    // Expressions
    "and",
    "or",
    "not",
    "between",
    "in",
    "like",
    "ilike",
    "similar to",
    "is",
    "isnull",
    "notnull",
    "null",
    "true",
    "false",
    "unknown",
    "default",
    "exists",
    "case",
    "when",
    "then",
    "else",
    "end",
    "cast",
    "collate",
    "filter",
    "over",
    // Ordering and windows
    "asc",
    "desc",
    "nulls first",
    "nulls last",
    "current row",
    "unbounded preceding",
    "unbounded following",
    "preceding",
    "following",
    "exclude current row",
    "exclude group",
    "exclude ties",
    "exclude no others",
    // Data manipulation
    "insert",
    "insert into",
    "update",
    "delete",
    "delete from",
    "merge into",
    "set",
    "returning",
    "default values",
    "on conflict",
    "do",
    "nothing",
    "when matched",
    "when not matched",
    "truncate",
    "truncate table",
    // Data definition
    "create table",
    "create temporary table",
    "create view",
    "create or replace view",
    "create procedure",
    "create or replace procedure",
    "alter table",
    "drop table",
    "drop view",
    "if",
    "constraint",
    "primary key",
    "foreign key",
    "references",
    "unique",
    "check",
    "on delete",
    "on update",
    "cascade",
    "restrict",
    "set null",
    "set default",
    "no action",
    "generated always as",
    "stored",
    "virtual",
    "add",
    "add column",
    "drop column",
    "drop constraint",
    "rename column",
    "rename constraint",
    "rename to",
    "to",
    // Procedural
    "begin",
    "out",
    "inout",
    "declare",
    "elseif",
    "elsif",
    "end if",
    "while",
    "end while",
    "return",
    // Transactions
    "begin transaction",
    "start transaction",
    "set transaction",
    "commit",
    "rollback",
    "rollback to",
    "rollback to savepoint",
    "savepoint",
    "release savepoint",
    "work",
    "transaction",
    "isolation level",
    "read committed",
    "read uncommitted",
    "repeatable read",
    "serializable",
    "read only",
    "read write",
    // Permissions
    "grant",
    "revoke",
    "with grant option",
    "grant option for",
    "all privileges",
    "table",
    "view",
    "procedure",
];

/// The ANSI dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiDialect;

impl AnsiDialect {
    /// Creates the ANSI dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn keywords(&self) -> KeywordTable {
        KeywordTable::from_phrases(ANSI_KEYWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lookup;

    #[test]
    fn test_ansi_dialect() {
        let dialect = AnsiDialect::new();
        assert_eq!(dialect.name(), "ansi");
        let keywords = dialect.keywords();
        assert!(keywords.contains("LEFT OUTER JOIN"));
        assert!(keywords.contains("select"));
        assert_eq!(keywords.lookup(&["left"]), Lookup::Prefix);
        assert_eq!(keywords.lookup(&["users"]), Lookup::NotFound);
    }

    #[test]
    fn test_phrases_are_lower_case_and_unique() {
        let keywords = AnsiDialect.keywords();
        assert_eq!(keywords.len(), ANSI_KEYWORDS.len());
        for phrase in ANSI_KEYWORDS {
            assert_eq!(*phrase, phrase.to_lowercase());
        }
    }
}
