//! # coldef-schema — Schema-to-DDL Compiler
//!
//! Converts a JSON table schema into the flat column list of an
//! Athena/Iceberg `CREATE TABLE` statement.
//!
//! ## Pipeline
//!
//! 1. **Load** ([`compile()`]): decode the document bytes, keeping key order.
//! 2. **Parse** ([`node`]): build a [`SchemaNode`] tree over the closed set
//!    of type keywords.
//! 3. **Map** ([`mapper`]): walk the tree, resolving each named child
//!    through the [`MappingOverlay`], sanitizing its name, and rendering its
//!    DDL type.
//! 4. **Assemble**: the root's fields become the top-level column list.
//!
//! [`ddl::CreateTable`] wraps a column list in a full statement.
//!
//! ## Crate Policy
//!
//! - Depends only on `coldef-core` internally.
//! - Pure and synchronous; the only input is the caller's bytes.
//! - Field order is column order and must never pass through an unordered map.

pub mod column;
pub mod compile;
pub mod ddl;
pub mod mapper;
pub mod node;
pub mod overlay;

// Re-export primary types for ergonomic imports.
pub use column::{Column, ColumnList, PairStyle};
pub use compile::{compile, compile_columns, compile_value, compile_value_columns, load_document};
pub use ddl::{CreateTable, ICEBERG_TABLE_TYPE};
pub use mapper::TypeMapper;
pub use node::{Fields, PrimitiveType, SchemaNode, TypeKeyword};
pub use overlay::{resolve_child, MappingOverlay, OverlayEntry, OverlayScope, ResolvedChild};

pub use coldef_core::CompileError;
