//! # Columns Subcommand
//!
//! Compiles one schema document and prints its column list.
//!
//! ```bash
//! coldef columns schemas/events.json
//! coldef columns schemas/events.json --overlay overlays/events.yaml --root-only-overlay
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use coldef_schema::{compile, OverlayScope};

use crate::config::load_overlay;
use crate::resolve_path;

/// Arguments for the columns subcommand.
#[derive(Args, Debug)]
pub struct ColumnsArgs {
    /// Path to the JSON schema document.
    pub schema: PathBuf,

    /// Overlay file renaming or retyping fields (JSON or YAML).
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Apply overlay entries to top-level fields only.
    #[arg(long, requires = "overlay")]
    pub root_only_overlay: bool,
}

/// Execute the columns subcommand.
pub fn run_columns(args: &ColumnsArgs, work_dir: &Path) -> Result<u8> {
    let columns = compile_file(args, work_dir)?;
    println!("{columns}");
    Ok(0)
}

/// Compile the schema named in `args` into its column list.
pub fn compile_file(args: &ColumnsArgs, work_dir: &Path) -> Result<String> {
    let schema_path = resolve_path(&args.schema, work_dir);
    let document = std::fs::read(&schema_path)
        .with_context(|| format!("failed to read schema {}", schema_path.display()))?;

    let scope = if args.root_only_overlay {
        OverlayScope::RootOnly
    } else {
        OverlayScope::AnyDepth
    };
    let overlay = args
        .overlay
        .as_deref()
        .map(|p| load_overlay(&resolve_path(p, work_dir), scope))
        .transpose()?;

    let columns = compile(&document, overlay.as_ref())
        .with_context(|| format!("failed to compile {}", schema_path.display()))?;
    tracing::info!(schema = %schema_path.display(), "compiled column list");
    Ok(columns)
}
