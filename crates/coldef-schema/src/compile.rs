//! # Document Loader & Assembler
//!
//! Entry points that turn a raw schema document into the flat column list
//! embedded in a `CREATE TABLE` statement.
//!
//! ```
//! use coldef_schema::compile;
//!
//! let doc = br#"{"id": {"type": "string"}, "ts": {"type": "timestamp"}}"#;
//! assert_eq!(compile(doc, None).unwrap(), "id string, ts bigint");
//! ```
//!
//! Compilation is a single top-down pass. The first error aborts it; no
//! partial column list is ever returned. Compiling is pure: the same document
//! and overlay always yield byte-identical output, and independent compiles
//! share no state.

use coldef_core::CompileError;
use serde_json::Value;

use crate::column::ColumnList;
use crate::mapper::TypeMapper;
use crate::node::{json_kind, SchemaNode};
use crate::overlay::MappingOverlay;

/// Compile a JSON schema document into a `name type, ...` column list.
pub fn compile(document: &[u8], overlay: Option<&MappingOverlay>) -> Result<String, CompileError> {
    compile_columns(document, overlay).map(|columns| columns.to_string())
}

/// Compile a JSON schema document into structured columns.
pub fn compile_columns(
    document: &[u8],
    overlay: Option<&MappingOverlay>,
) -> Result<ColumnList, CompileError> {
    let value = load_document(document)?;
    compile_value_columns(&value, overlay)
}

/// Compile an already-decoded schema document into a column list.
pub fn compile_value(value: &Value, overlay: Option<&MappingOverlay>) -> Result<String, CompileError> {
    compile_value_columns(value, overlay).map(|columns| columns.to_string())
}

/// Compile an already-decoded schema document into structured columns.
pub fn compile_value_columns(
    value: &Value,
    overlay: Option<&MappingOverlay>,
) -> Result<ColumnList, CompileError> {
    if !value.is_object() {
        return Err(CompileError::InvalidRootType {
            found: json_kind(value).to_string(),
        });
    }
    let root = SchemaNode::from_value(value)?;
    let columns = TypeMapper::with_overlay(overlay).columns(&root)?;
    tracing::debug!(
        columns = columns.len(),
        overlay_entries = overlay.map_or(0, MappingOverlay::len),
        "compiled schema document"
    );
    Ok(columns)
}

/// Decode raw document bytes. Field order is preserved.
pub fn load_document(document: &[u8]) -> Result<Value, CompileError> {
    serde_json::from_slice(document).map_err(|e| CompileError::InvalidDocument(e.to_string()))
}
