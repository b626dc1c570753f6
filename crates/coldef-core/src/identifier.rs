//! # DDL Identifier Sanitization
//!
//! Turns an arbitrary schema field key into an identifier that is safe to
//! emit in an Athena/Iceberg DDL statement.
//!
//! ## Rules
//!
//! 1. Empty input yields empty output.
//! 2. Every character outside `[A-Za-z0-9_-]` is stripped.
//! 3. If the lowercase form of the *original* key is a reserved DDL keyword,
//!    the stripped result is wrapped in backticks.
//!
//! Sanitization is idempotent for names that are already legal and not
//! reserved. Backtick-quoted output is not: the backticks are themselves
//! illegal characters and would be stripped on a second pass, so each name
//! must be sanitized exactly once.

/// Reserved keywords of the Athena DDL dialect, lowercase and sorted so
/// lookups can use `binary_search`.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "all",
    "alter",
    "and",
    "array",
    "as",
    "authorization",
    "between",
    "bigint",
    "binary",
    "boolean",
    "both",
    "by",
    "case",
    "cashe",
    "cast",
    "char",
    "column",
    "commit",
    "conf",
    "constraint",
    "create",
    "cross",
    "cube",
    "current",
    "current_date",
    "current_timestamp",
    "cursor",
    "database",
    "date",
    "dayofweek",
    "decimal",
    "delete",
    "describe",
    "distinct",
    "double",
    "drop",
    "else",
    "end",
    "exchange",
    "exists",
    "extended",
    "external",
    "extract",
    "false",
    "fetch",
    "float",
    "floor",
    "following",
    "for",
    "foreign",
    "from",
    "full",
    "function",
    "grant",
    "group",
    "grouping",
    "having",
    "if",
    "import",
    "in",
    "inner",
    "insert",
    "int",
    "integer",
    "intersect",
    "interval",
    "into",
    "is",
    "join",
    "lateral",
    "left",
    "less",
    "like",
    "local",
    "macro",
    "map",
    "more",
    "none",
    "not",
    "null",
    "numeric",
    "of",
    "on",
    "only",
    "or",
    "order",
    "out",
    "outer",
    "over",
    "partialscan",
    "partition",
    "percent",
    "preceding",
    "precision",
    "preserve",
    "primary",
    "procedure",
    "range",
    "reads",
    "reduce",
    "references",
    "regexp",
    "revoke",
    "right",
    "rlike",
    "rollback",
    "rollup",
    "row",
    "rows",
    "select",
    "set",
    "smallint",
    "start",
    "table",
    "tablesample",
    "then",
    "time",
    "timestamp",
    "to",
    "transform",
    "trigger",
    "true",
    "truncate",
    "unbounded",
    "union",
    "uniquejoin",
    "update",
    "user",
    "using",
    "utc_timestamp",
    "values",
    "varchar",
    "views",
    "when",
    "where",
    "window",
    "with",
];

/// Returns true if `name` is a reserved DDL keyword (case-insensitive).
pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS
        .binary_search(&name.to_lowercase().as_str())
        .is_ok()
}

/// Returns true for characters allowed in an unquoted DDL identifier.
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Sanitize a field key for use as a DDL identifier.
///
/// ```
/// use coldef_core::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("my_col"), "my_col");
/// assert_eq!(sanitize_identifier("table"), "`table`");
/// assert_eq!(sanitize_identifier("price ($)"), "price");
/// ```
pub fn sanitize_identifier(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let stripped: String = name.chars().filter(|c| is_identifier_char(*c)).collect();
    if is_reserved_keyword(name) {
        format!("`{stripped}`")
    } else {
        stripped
    }
}
