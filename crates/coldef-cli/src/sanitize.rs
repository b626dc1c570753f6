//! # Sanitize Subcommand
//!
//! Prints the DDL-safe form of each given field name, one per line.

use anyhow::Result;
use clap::Args;

use coldef_core::sanitize_identifier;

/// Arguments for the sanitize subcommand.
#[derive(Args, Debug)]
pub struct SanitizeArgs {
    /// Field names to sanitize.
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Execute the sanitize subcommand.
pub fn run_sanitize(args: &SanitizeArgs) -> Result<u8> {
    for line in sanitize_all(&args.names) {
        println!("{line}");
    }
    Ok(0)
}

fn sanitize_all(names: &[String]) -> Vec<String> {
    names.iter().map(|n| sanitize_identifier(n)).collect()
}
