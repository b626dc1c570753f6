//! # Type Mapper
//!
//! Maps a [`SchemaNode`] tree to DDL type strings.
//!
//! | Node                 | DDL type                      |
//! |----------------------|-------------------------------|
//! | `string`             | `string`                      |
//! | `boolean`            | `boolean`                     |
//! | `integer`            | `int`                         |
//! | `number` / `float`   | `float`                       |
//! | `date`               | `date`                        |
//! | `datetime`           | `timestamp`                   |
//! | `timestamp` / `long` | `bigint`                      |
//! | `decimal(p,s)`       | `decimal(p,s)`                |
//! | `array(item)`        | `array<item>`                 |
//! | `map(k,v)`           | `map<k, v>`                   |
//! | explicit object      | `struct<name: type, ...>`     |
//! | implicit grouping    | `struct<name type, ...>`      |
//! | `null`               | [`CompileError::UnsupportedType`] |
//!
//! Explicit objects render members as `name: type`, the form the dialect
//! requires inside `struct<...>`. Groupings render `name type`, the form of a
//! column list. At the root the fields are not wrapped at all but keep their
//! pair style (see [`TypeMapper::columns`]).
//!
//! For every named child the mapper first resolves the key through the
//! overlay, then sanitizes the (possibly replaced) key, then maps the
//! (possibly replaced) node. An overlay key met again inside its own
//! replacement is a [`CompileError::MalformedOverlay`].

use coldef_core::{sanitize_identifier, CompileError, FieldPath};

use crate::column::{Column, ColumnList, PairStyle};
use crate::node::{Fields, SchemaNode};
use crate::overlay::{resolve_child, MappingOverlay, ResolvedChild};

/// Maps schema nodes to DDL types, consulting an optional overlay at every
/// struct or grouping child.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMapper<'a> {
    overlay: Option<&'a MappingOverlay>,
}

impl<'a> TypeMapper<'a> {
    /// A mapper without overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapper that resolves children through `overlay`.
    pub fn with_overlay(overlay: Option<&'a MappingOverlay>) -> Self {
        Self { overlay }
    }

    /// Map a node to its DDL type string.
    pub fn map(&self, node: &SchemaNode) -> Result<String, CompileError> {
        self.map_at(node, &FieldPath::root(), &mut Vec::new())
    }

    /// Map the root of a document to its flat column list.
    ///
    /// The root must be a grouping or an explicit object; its fields become
    /// top-level columns and are never wrapped in `struct<...>`. They keep
    /// the pair style they would have inside the wrapper, so an explicit
    /// object root yields `name: type` pairs.
    pub fn columns(&self, root: &SchemaNode) -> Result<ColumnList, CompileError> {
        let root_path = FieldPath::root();
        match root {
            SchemaNode::ObjectGroup(fields) => {
                self.field_list(fields, PairStyle::Spaced, &root_path, &mut Vec::new())
            }
            SchemaNode::Struct(fields) => {
                self.field_list(fields, PairStyle::Colon, &root_path, &mut Vec::new())
            }
            other => Err(CompileError::InvalidRootType {
                found: other.kind().to_string(),
            }),
        }
    }

    /// `expanding` holds the overlay keys whose replacement nodes enclose
    /// `node`.
    fn map_at(
        &self,
        node: &SchemaNode,
        path: &FieldPath,
        expanding: &mut Vec<String>,
    ) -> Result<String, CompileError> {
        match node {
            SchemaNode::Primitive(primitive) => Ok(primitive.sql_type().to_string()),
            SchemaNode::Decimal { precision, scale } => Ok(format!("decimal({precision},{scale})")),
            SchemaNode::Array(item) => Ok(format!(
                "array<{}>",
                self.map_at(item, &path.child("items"), expanding)?
            )),
            SchemaNode::Map { key, value } => Ok(format!(
                "map<{}, {}>",
                self.map_at(key, &path.child("key"), expanding)?,
                self.map_at(value, &path.child("value"), expanding)?
            )),
            SchemaNode::Struct(fields) => {
                let members = self.field_list(fields, PairStyle::Colon, path, expanding)?;
                Ok(format!("struct<{members}>"))
            }
            SchemaNode::ObjectGroup(fields) => {
                let members = self.field_list(fields, PairStyle::Spaced, path, expanding)?;
                Ok(format!("struct<{members}>"))
            }
            SchemaNode::Null => Err(CompileError::UnsupportedType { path: path.clone() }),
        }
    }

    fn field_list(
        &self,
        fields: &Fields,
        style: PairStyle,
        parent: &FieldPath,
        expanding: &mut Vec<String>,
    ) -> Result<ColumnList, CompileError> {
        let mut columns = Vec::with_capacity(fields.len());
        for (key, node) in fields {
            let column = match resolve_child(key, parent, self.overlay) {
                ResolvedChild::Original => {
                    let sql_type = self.map_at(node, &parent.child(key), expanding)?;
                    Column::new(sanitize_identifier(key), sql_type)
                }
                ResolvedChild::Replaced {
                    key: new_key,
                    node: new_node,
                } => {
                    // Under any-depth lookup the same key would be replaced
                    // again inside its own replacement, forever.
                    if expanding.iter().any(|k| k == key) {
                        return Err(CompileError::MalformedOverlay {
                            key: key.clone(),
                            reason: "replacement expands into itself".to_string(),
                        });
                    }
                    tracing::trace!(from = %key, to = %new_key, parent = %parent, "applied overlay entry");
                    expanding.push(key.clone());
                    let sql_type = self.map_at(new_node, &parent.child(new_key), expanding);
                    expanding.pop();
                    Column::new(sanitize_identifier(new_key), sql_type?)
                }
            };
            columns.push(column);
        }
        Ok(ColumnList::new(columns).with_style(style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::PrimitiveType;
    use serde_json::json;

    fn node(value: serde_json::Value) -> SchemaNode {
        SchemaNode::from_value(&value).unwrap()
    }

    fn map(value: serde_json::Value) -> Result<String, CompileError> {
        TypeMapper::new().map(&node(value))
    }

    #[test]
    fn primitive_dispatch_table() {
        let cases = [
            ("string", "string"),
            ("boolean", "boolean"),
            ("integer", "int"),
            ("number", "float"),
            ("float", "float"),
            ("date", "date"),
            ("datetime", "timestamp"),
            ("timestamp", "bigint"),
            ("long", "bigint"),
        ];
        for (keyword, expected) in cases {
            assert_eq!(map(json!({"type": keyword})).unwrap(), expected, "{keyword}");
        }
    }

    #[test]
    fn decimal_renders_without_float_artifacts() {
        let out = map(json!({
            "type": "decimal",
            "properties": {"precision": 5.0, "scale": 2.0}
        }))
        .unwrap();
        assert_eq!(out, "decimal(5,2)");
    }

    #[test]
    fn array_of_array() {
        let out = map(json!({
            "type": "array",
            "items": {"type": "array", "items": {"type": "long"}}
        }))
        .unwrap();
        assert_eq!(out, "array<array<bigint>>");
    }

    #[test]
    fn map_with_struct_value() {
        let out = map(json!({
            "type": "map",
            "properties": {
                "key": {"type": "string"},
                "value": {
                    "type": "object",
                    "properties": {"n": {"type": "integer"}}
                }
            }
        }))
        .unwrap();
        assert_eq!(out, "map<string, struct<n: int>>");
    }

    #[test]
    fn explicit_object_uses_colon_form() {
        let out = map(json!({
            "type": "object",
            "properties": {"col1": {"type": "integer"}, "col2": {"type": "float"}}
        }))
        .unwrap();
        assert_eq!(out, "struct<col1: int, col2: float>");
    }

    #[test]
    fn grouping_uses_space_form() {
        let out = map(json!({"col1": {"type": "integer"}, "col2": {"type": "float"}})).unwrap();
        assert_eq!(out, "struct<col1 int, col2 float>");
    }

    #[test]
    fn nested_member_names_are_sanitized() {
        let out = map(json!({
            "type": "object",
            "properties": {"user name": {"type": "string"}, "date": {"type": "date"}}
        }))
        .unwrap();
        assert_eq!(out, "struct<username: string, `date`: date>");
    }

    #[test]
    fn null_reports_path() {
        let err = map(json!({
            "type": "object",
            "properties": {"x": {"type": "array", "items": {"type": "null"}}}
        }))
        .unwrap_err();
        assert_eq!(
            err,
            CompileError::UnsupportedType {
                path: FieldPath::root().child("x").child("items")
            }
        );
    }

    #[test]
    fn columns_rejects_non_grouping_root() {
        let err = TypeMapper::new()
            .columns(&SchemaNode::Primitive(PrimitiveType::String))
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidRootType {
                found: "string".to_string()
            }
        );
    }

    #[test]
    fn columns_of_explicit_object_root() {
        let root = node(json!({
            "type": "object",
            "properties": {"a": {"type": "integer"}, "b": {"type": "string"}}
        }));
        let columns = TypeMapper::new().columns(&root).unwrap();
        assert_eq!(columns.style(), PairStyle::Colon);
        assert_eq!(columns.to_string(), "a: int, b: string");
    }

    #[test]
    fn columns_of_grouping_root_use_space_form() {
        let root = node(json!({"a": {"type": "integer"}, "b": {"type": "string"}}));
        let columns = TypeMapper::new().columns(&root).unwrap();
        assert_eq!(columns.to_string(), "a int, b string");
    }

    #[test]
    fn self_expanding_replacement_is_rejected() {
        let mut overlay = MappingOverlay::new();
        overlay.insert(
            "a",
            "b",
            node(json!({"type": "object", "properties": {"a": {"type": "string"}}})),
        );
        let root = node(json!({"a": {"type": "string"}}));
        let err = TypeMapper::with_overlay(Some(&overlay)).columns(&root).unwrap_err();
        assert_eq!(
            err,
            CompileError::MalformedOverlay {
                key: "a".to_string(),
                reason: "replacement expands into itself".to_string()
            }
        );
    }

    #[test]
    fn overlay_replacement_skips_original_subtree() {
        let mut overlay = MappingOverlay::new();
        overlay.insert("legacy", "legacy_id", SchemaNode::Primitive(PrimitiveType::Long));
        let root = node(json!({"legacy": {"type": "null"}}));
        let columns = TypeMapper::with_overlay(Some(&overlay)).columns(&root).unwrap();
        assert_eq!(columns.to_string(), "legacy_id bigint");
    }

    #[test]
    fn overlay_replacement_key_is_sanitized() {
        let mut overlay = MappingOverlay::new();
        overlay.insert("a", "table", SchemaNode::Primitive(PrimitiveType::String));
        let root = node(json!({"a": {"type": "integer"}}));
        let columns = TypeMapper::with_overlay(Some(&overlay)).columns(&root).unwrap();
        assert_eq!(columns.to_string(), "`table` string");
    }
}
