//! # Build Subcommand
//!
//! Compiles every table in a manifest into a `CREATE TABLE` statement.
//!
//! ```bash
//! coldef build                          # coldef.yaml, statements to stdout
//! coldef build --config tables.yaml --table events
//! coldef build --out dist/ddl           # writes dist/ddl/<table>.sql
//! ```
//!
//! Each table is compiled independently. Tables are processed in manifest
//! order and the first failure aborts the run.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use coldef_schema::{compile_columns, CreateTable};

use crate::config::{load_overlay, Manifest, TableConfig, DEFAULT_MANIFEST};
use crate::resolve_path;

/// Arguments for the build subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Build only the named table.
    #[arg(long)]
    pub table: Option<String>,

    /// Directory to write `<table>.sql` files into. Prints to stdout if unset.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// A rendered statement for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltTable {
    pub name: String,
    pub statement: String,
}

/// Execute the build subcommand.
pub fn run_build(args: &BuildArgs, config: Option<&Path>, work_dir: &Path) -> Result<u8> {
    let manifest_path = resolve_path(config.unwrap_or(Path::new(DEFAULT_MANIFEST)), work_dir);
    let manifest = Manifest::load(&manifest_path)?;
    let built = build_tables(&manifest, args.table.as_deref())?;

    match &args.out {
        Some(out) => {
            let out = resolve_path(out, work_dir);
            std::fs::create_dir_all(&out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            for table in &built {
                let path = out.join(format!("{}.sql", table.name));
                std::fs::write(&path, format!("{}\n", table.statement))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!(table = %table.name, path = %path.display(), "wrote statement");
            }
            println!("Wrote {} statement(s) to {}", built.len(), out.display());
        }
        None => {
            for table in &built {
                println!("{};\n", table.statement);
            }
        }
    }
    Ok(0)
}

/// Compile the manifest's tables, or only `only` if given.
pub fn build_tables(manifest: &Manifest, only: Option<&str>) -> Result<Vec<BuiltTable>> {
    let selected: Vec<&TableConfig> = manifest
        .tables
        .iter()
        .filter(|t| only.map_or(true, |name| t.name == name))
        .collect();
    if let (Some(name), true) = (only, selected.is_empty()) {
        bail!("table '{name}' is not defined in the manifest");
    }

    let mut built = Vec::with_capacity(selected.len());
    for table in selected {
        let statement = build_table(manifest, table)
            .with_context(|| format!("failed to build table '{}'", table.name))?;
        built.push(BuiltTable {
            name: table.name.clone(),
            statement,
        });
    }
    Ok(built)
}

fn build_table(manifest: &Manifest, table: &TableConfig) -> Result<String> {
    let document = std::fs::read(&table.schema)
        .with_context(|| format!("failed to read schema {}", table.schema.display()))?;
    let overlay = table
        .overlay
        .as_deref()
        .map(|p| load_overlay(p, table.overlay_scope.into()))
        .transpose()?;

    let columns = compile_columns(&document, overlay.as_ref())?;
    let mut statement = CreateTable::from_columns(&table.name, &columns, &table.location)
        .partitioned_by(table.partitioned_by.iter().cloned());
    if let Some(db) = manifest.database_for(table) {
        statement = statement.database(db);
    }
    for (key, value) in &table.properties {
        statement = statement.property(key, value);
    }
    tracing::debug!(table = %table.name, columns = columns.len(), "built table");
    Ok(statement.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(dir: &Path) -> PathBuf {
        std::fs::create_dir_all(dir.join("schemas")).unwrap();
        std::fs::write(
            dir.join("schemas/events.json"),
            r#"{"id": {"type": "string"}, "ts": {"type": "datetime"}, "payload": {"type": "string"}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.join("schemas/users.json"),
            r#"{"user": {"type": "string"}, "age": {"type": "integer"}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.join("events.overlay.yaml"),
            "payload:\n  payload:\n    type: map\n    properties:\n      key: {type: string}\n      value: {type: string}\n",
        )
        .unwrap();
        let manifest = dir.join(DEFAULT_MANIFEST);
        std::fs::write(
            &manifest,
            r#"
database: analytics
tables:
  - name: events
    schema: schemas/events.json
    overlay: events.overlay.yaml
    location: s3://bucket/events/
    partitioned_by: ["day(ts)"]
    properties:
      format: parquet
  - name: users
    schema: schemas/users.json
    location: s3://bucket/users/
"#,
        )
        .unwrap();
        manifest
    }

    #[test]
    fn builds_all_tables_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::load(&write_fixture(dir.path())).unwrap();
        let built = build_tables(&manifest, None).unwrap();

        assert_eq!(built.len(), 2);
        assert_eq!(built[0].name, "events");
        assert_eq!(
            built[0].statement,
            "CREATE TABLE IF NOT EXISTS analytics.events \
             (id string, ts timestamp, payload map<string, string>)\n\
             PARTITIONED BY (day(ts))\n\
             LOCATION 's3://bucket/events/'\n\
             TBLPROPERTIES ('table_type'='ICEBERG', 'format'='parquet')"
        );
        assert!(built[1]
            .statement
            .starts_with("CREATE TABLE IF NOT EXISTS analytics.users (`user` string, age int)"));
    }

    #[test]
    fn builds_single_table() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::load(&write_fixture(dir.path())).unwrap();
        let built = build_tables(&manifest, Some("users")).unwrap();
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].name, "users");
    }

    #[test]
    fn unknown_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::load(&write_fixture(dir.path())).unwrap();
        let err = build_tables(&manifest, Some("orders")).unwrap_err();
        assert!(err.to_string().contains("'orders'"), "{err}");
    }

    #[test]
    fn writes_sql_files() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        let args = BuildArgs {
            table: None,
            out: Some(PathBuf::from("ddl")),
        };
        assert_eq!(run_build(&args, None, dir.path()).unwrap(), 0);
        let events = std::fs::read_to_string(dir.path().join("ddl/events.sql")).unwrap();
        assert!(events.starts_with("CREATE TABLE IF NOT EXISTS analytics.events"));
        assert!(dir.path().join("ddl/users.sql").exists());
    }

    #[test]
    fn failing_table_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path());
        std::fs::write(dir.path().join("schemas/users.json"), r#"{"x": {"type": "bogus"}}"#)
            .unwrap();
        let manifest = Manifest::load(&path).unwrap();
        let err = build_tables(&manifest, None).unwrap_err();
        assert!(err.to_string().contains("failed to build table 'users'"), "{err}");
        assert!(format!("{err:#}").contains("unknown type 'bogus'"), "{err:#}");
    }
}
