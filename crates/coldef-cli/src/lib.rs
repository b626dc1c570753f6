//! # coldef-cli — Command-Line Interface for coldef
//!
//! Provides the `coldef` binary.
//!
//! ## Subcommands
//!
//! - `coldef columns` — compile one schema document into a column list.
//! - `coldef sanitize` — print the DDL-safe form of field names.
//! - `coldef build` — compile every table of a manifest into `CREATE TABLE`
//!   statements.
//!
//! ```bash
//! coldef columns schemas/events.json --overlay overlays/events.yaml
//! coldef sanitize table "first name"
//! coldef build --config coldef.yaml --out dist/ddl
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; compilation lives in `coldef-schema`.
//! - Handlers return an exit code; errors carry file context via `anyhow`.

pub mod build;
pub mod columns;
pub mod config;
pub mod sanitize;

use std::path::{Path, PathBuf};

/// Resolve a possibly relative path against the working directory.
pub fn resolve_path(path: &Path, work_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        work_dir.join(path)
    }
}
