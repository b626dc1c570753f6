//! # coldef-core — Foundational Types for coldef
//!
//! Leaf crate of the workspace. Defines the compile error taxonomy and the
//! DDL identifier sanitizer shared by the schema compiler and the CLI.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `coldef-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - The reserved keyword table is a `const`; nothing mutates it at runtime.

pub mod error;
pub mod identifier;

// Re-export primary types for ergonomic imports.
pub use error::{CompileError, FieldPath};
pub use identifier::{is_reserved_keyword, sanitize_identifier, RESERVED_KEYWORDS};
