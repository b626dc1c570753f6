//! # CREATE TABLE Rendering
//!
//! Embeds a compiled column list in an Athena `CREATE TABLE` statement for
//! an Iceberg table:
//!
//! ```text
//! CREATE TABLE IF NOT EXISTS <database>.<table> (<columns>)
//! PARTITIONED BY (<expr>, ...)
//! LOCATION '<location>'
//! TBLPROPERTIES ('table_type'='ICEBERG', '<key>'='<value>', ...)
//! ```
//!
//! Database and table names go through the identifier sanitizer; names that
//! keep a hyphen are backtick-quoted, since Athena only accepts a bare
//! hyphen inside column names. String literals have embedded single quotes
//! doubled. Partition expressions are
//! emitted verbatim since they may be transforms such as `day(ts)`.

use coldef_core::{sanitize_identifier, CompileError};

use crate::column::ColumnList;

/// Value of the mandatory `table_type` property.
pub const ICEBERG_TABLE_TYPE: &str = "ICEBERG";

/// Builder for one `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    database: Option<String>,
    table: String,
    columns: String,
    partitioned_by: Vec<String>,
    location: String,
    properties: Vec<(String, String)>,
}

impl CreateTable {
    /// Statement for `table` with an already-compiled column list.
    pub fn new(
        table: impl Into<String>,
        columns: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            database: None,
            table: table.into(),
            columns: columns.into(),
            partitioned_by: Vec::new(),
            location: location.into(),
            properties: Vec::new(),
        }
    }

    /// Statement for `table` from structured columns.
    pub fn from_columns(
        table: impl Into<String>,
        columns: &ColumnList,
        location: impl Into<String>,
    ) -> Self {
        Self::new(table, columns.to_string(), location)
    }

    /// Qualify the table with a database name.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Add partition expressions, in order.
    pub fn partitioned_by<I, S>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.partitioned_by.extend(exprs.into_iter().map(Into::into));
        self
    }

    /// Add a table property after `table_type`.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// Render the statement.
    pub fn render(&self) -> Result<String, CompileError> {
        let table = object_name(&self.table);
        if table.is_empty() {
            return Err(CompileError::InvalidTableDefinition(format!(
                "table name {:?} is empty after sanitization",
                self.table
            )));
        }
        if self.columns.trim().is_empty() {
            return Err(CompileError::InvalidTableDefinition(format!(
                "table {table} has no columns"
            )));
        }
        if self.location.trim().is_empty() {
            return Err(CompileError::InvalidTableDefinition(format!(
                "table {table} has no location"
            )));
        }
        if let Some((key, _)) = self
            .properties
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("table_type"))
        {
            return Err(CompileError::InvalidTableDefinition(format!(
                "property '{key}' is reserved; table_type is always {ICEBERG_TABLE_TYPE}"
            )));
        }

        let qualified = match &self.database {
            Some(db) => {
                let db = object_name(db);
                if db.is_empty() {
                    return Err(CompileError::InvalidTableDefinition(format!(
                        "database name for table {table} is empty after sanitization"
                    )));
                }
                format!("{db}.{table}")
            }
            None => table,
        };

        let mut lines = vec![format!(
            "CREATE TABLE IF NOT EXISTS {qualified} ({})",
            self.columns
        )];
        if !self.partitioned_by.is_empty() {
            lines.push(format!(
                "PARTITIONED BY ({})",
                self.partitioned_by.join(", ")
            ));
        }
        lines.push(format!("LOCATION {}", quote_literal(&self.location)));

        let mut properties = vec![format!(
            "{}={}",
            quote_literal("table_type"),
            quote_literal(ICEBERG_TABLE_TYPE)
        )];
        properties.extend(
            self.properties
                .iter()
                .map(|(k, v)| format!("{}={}", quote_literal(k), quote_literal(v))),
        );
        lines.push(format!("TBLPROPERTIES ({})", properties.join(", ")));

        Ok(lines.join("\n"))
    }
}

/// Sanitize a database or table name, quoting it if a hyphen survives.
/// Reserved words come back already quoted and never contain a hyphen.
fn object_name(raw: &str) -> String {
    let name = sanitize_identifier(raw);
    if name.contains('-') {
        format!("`{name}`")
    } else {
        name
    }
}

/// Quote a string literal, doubling embedded single quotes.
fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_statement() {
        let sql = CreateTable::new("events", "id string, ts bigint", "s3://bucket/events/")
            .render()
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS events (id string, ts bigint)\n\
             LOCATION 's3://bucket/events/'\n\
             TBLPROPERTIES ('table_type'='ICEBERG')"
        );
    }

    #[test]
    fn full_statement() {
        let sql = CreateTable::new("events", "id string, ts timestamp", "s3://b/e/")
            .database("analytics")
            .partitioned_by(["day(ts)", "bucket(16, id)"])
            .property("format", "parquet")
            .property("write_compression", "zstd")
            .render()
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS analytics.events (id string, ts timestamp)\n\
             PARTITIONED BY (day(ts), bucket(16, id))\n\
             LOCATION 's3://b/e/'\n\
             TBLPROPERTIES ('table_type'='ICEBERG', 'format'='parquet', 'write_compression'='zstd')"
        );
    }

    #[test]
    fn names_are_sanitized() {
        let sql = CreateTable::new("user", "id string", "s3://b/u/")
            .database("my db")
            .render()
            .unwrap();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS mydb.`user` ("), "{sql}");
    }

    #[test]
    fn hyphenated_names_are_quoted() {
        let sql = CreateTable::new("my-table", "id string", "s3://b/t/")
            .database("raw-zone")
            .render()
            .unwrap();
        assert!(
            sql.starts_with("CREATE TABLE IF NOT EXISTS `raw-zone`.`my-table` (id string)"),
            "{sql}"
        );
    }

    #[test]
    fn literals_are_escaped() {
        let sql = CreateTable::new("t", "id string", "s3://b/o'neil/")
            .property("comment", "it's")
            .render()
            .unwrap();
        assert!(sql.contains("LOCATION 's3://b/o''neil/'"), "{sql}");
        assert!(sql.contains("'comment'='it''s'"), "{sql}");
    }

    #[test]
    fn missing_location_rejected() {
        let err = CreateTable::new("t", "id string", " ").render().unwrap_err();
        assert!(matches!(err, CompileError::InvalidTableDefinition(_)));
    }

    #[test]
    fn empty_columns_rejected() {
        let err = CreateTable::new("t", "", "s3://b/").render().unwrap_err();
        assert!(matches!(err, CompileError::InvalidTableDefinition(_)));
    }

    #[test]
    fn unusable_table_name_rejected() {
        let err = CreateTable::new("!!", "id string", "s3://b/").render().unwrap_err();
        assert!(matches!(err, CompileError::InvalidTableDefinition(_)));
    }

    #[test]
    fn table_type_override_rejected() {
        let err = CreateTable::new("t", "id string", "s3://b/")
            .property("TABLE_TYPE", "HIVE")
            .render()
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidTableDefinition(_)));
    }
}
