//! # coldef CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use coldef_cli::build::{run_build, BuildArgs};
use coldef_cli::columns::{run_columns, ColumnsArgs};
use coldef_cli::sanitize::{run_sanitize, SanitizeArgs};

/// coldef — compile JSON table schemas into Athena/Iceberg DDL.
#[derive(Parser, Debug)]
#[command(name = "coldef", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the table manifest (defaults to coldef.yaml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a schema document into a DDL column list.
    Columns(ColumnsArgs),

    /// Print the DDL-safe form of field names.
    Sanitize(SanitizeArgs),

    /// Build CREATE TABLE statements for the tables in the manifest.
    Build(BuildArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    tracing::debug!(work_dir = %work_dir.display(), "coldef starting");

    let result = match &cli.command {
        Commands::Columns(args) => run_columns(args, &work_dir),
        Commands::Sanitize(args) => run_sanitize(args),
        Commands::Build(args) => run_build(args, cli.config.as_deref(), &work_dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
