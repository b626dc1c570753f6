//! # Schema Nodes
//!
//! The in-memory tree a schema document is parsed into before type mapping.
//!
//! ## Grammar
//!
//! ```text
//! Node := { "type": <TypeKeyword>, ...type-specific keys }
//!       | { "properties": { <key>: Node, ... } }     // implicit grouping
//!       | { <key>: Node, ... }                       // implicit grouping
//! ```
//!
//! Type-specific keys:
//!
//! - `array`:   sibling `items: Node`
//! - `object`:  `properties: { key: Node, ... }`
//! - `decimal`: `properties: { precision: int, scale: int }`
//! - `map`:     `properties: { key: Node, value: Node }`
//!
//! A node without a `type` keyword groups named children. When the only key
//! of such a node is a `properties` object, that object holds the children;
//! otherwise every key of the node is a child.
//!
//! ## Field Order
//!
//! Field order is column order. Documents are decoded with `serde_json`'s
//! `preserve_order` feature and fields are stored as an ordered `Vec`, so the
//! declaration order of the source document survives into the output.

use coldef_core::{CompileError, FieldPath};
use serde_json::{Map, Value};

/// Ordered `(key, node)` children of a struct or grouping node.
pub type Fields = Vec<(String, SchemaNode)>;

/// Primitive column types recognized in the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Boolean,
    Integer,
    Number,
    Float,
    Date,
    /// Calendar date and time.
    Datetime,
    /// Epoch microseconds, stored as a 64-bit integer.
    Timestamp,
    Long,
}

impl PrimitiveType {
    /// The DDL type this primitive compiles to.
    pub fn sql_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "int",
            Self::Number | Self::Float => "float",
            Self::Date => "date",
            Self::Datetime => "timestamp",
            Self::Timestamp | Self::Long => "bigint",
        }
    }
}

/// The closed set of values accepted in a node's `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKeyword {
    String,
    Boolean,
    Integer,
    Number,
    Array,
    Object,
    Float,
    Date,
    Datetime,
    Timestamp,
    Long,
    Decimal,
    Map,
    Null,
}

impl TypeKeyword {
    /// All keywords, in the order the grammar lists them.
    pub const ALL: [TypeKeyword; 14] = [
        Self::String,
        Self::Boolean,
        Self::Integer,
        Self::Number,
        Self::Array,
        Self::Object,
        Self::Float,
        Self::Date,
        Self::Datetime,
        Self::Timestamp,
        Self::Long,
        Self::Decimal,
        Self::Map,
        Self::Null,
    ];

    /// Parse a keyword as written in a document. Matching is exact.
    pub fn from_keyword(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kw| kw.as_str() == s)
    }

    /// The keyword as written in a document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Array => "array",
            Self::Object => "object",
            Self::Float => "float",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Long => "long",
            Self::Decimal => "decimal",
            Self::Map => "map",
            Self::Null => "null",
        }
    }
}

impl std::fmt::Display for TypeKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field's type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    Primitive(PrimitiveType),
    Decimal { precision: u32, scale: u32 },
    Array(Box<SchemaNode>),
    Map {
        key: Box<SchemaNode>,
        value: Box<SchemaNode>,
    },
    /// Explicit `"type": "object"` with `properties`.
    Struct(Fields),
    /// No `type` keyword; groups named children. The document root is
    /// usually one of these.
    ObjectGroup(Fields),
    /// `"type": "null"`. Parses, but has no DDL representation.
    Null,
}

impl SchemaNode {
    /// Parse a node from a decoded JSON value.
    pub fn from_value(value: &Value) -> Result<Self, CompileError> {
        Self::parse(value, &FieldPath::root())
    }

    /// Parse a node located at `path` within its document.
    pub fn parse(value: &Value, path: &FieldPath) -> Result<Self, CompileError> {
        let Some(obj) = value.as_object() else {
            return Err(CompileError::malformed(
                path,
                format!("expected an object, found {}", json_kind(value)),
            ));
        };

        match obj.get("type") {
            None => parse_group(obj, path),
            Some(Value::String(name)) => {
                let keyword =
                    TypeKeyword::from_keyword(name).ok_or_else(|| CompileError::UnknownType {
                        path: path.clone(),
                        type_name: name.clone(),
                    })?;
                parse_typed(keyword, obj, path)
            }
            Some(other) => Err(CompileError::malformed(
                path,
                format!("`type` must be a string, found {}", json_kind(other)),
            )),
        }
    }

    /// Short name of the node's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Primitive(p) => match p {
                PrimitiveType::String => "string",
                PrimitiveType::Boolean => "boolean",
                PrimitiveType::Integer => "integer",
                PrimitiveType::Number => "number",
                PrimitiveType::Float => "float",
                PrimitiveType::Date => "date",
                PrimitiveType::Datetime => "datetime",
                PrimitiveType::Timestamp => "timestamp",
                PrimitiveType::Long => "long",
            },
            Self::Decimal { .. } => "decimal",
            Self::Array(_) => "array",
            Self::Map { .. } => "map",
            Self::Struct(_) => "object",
            Self::ObjectGroup(_) => "group",
            Self::Null => "null",
        }
    }

    /// Named children, for struct and grouping nodes.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Self::Struct(fields) | Self::ObjectGroup(fields) => Some(fields),
            _ => None,
        }
    }
}

fn parse_group(obj: &Map<String, Value>, path: &FieldPath) -> Result<SchemaNode, CompileError> {
    if obj.is_empty() {
        return Err(CompileError::malformed(
            path,
            "node has neither a `type` keyword nor named children",
        ));
    }
    let children = match obj.get("properties") {
        Some(Value::Object(props)) if obj.len() == 1 => props,
        _ => obj,
    };
    parse_fields(children, path).map(SchemaNode::ObjectGroup)
}

fn parse_fields(children: &Map<String, Value>, path: &FieldPath) -> Result<Fields, CompileError> {
    let mut fields = Vec::with_capacity(children.len());
    for (key, child) in children {
        fields.push((key.clone(), SchemaNode::parse(child, &path.child(key))?));
    }
    Ok(fields)
}

fn parse_typed(
    keyword: TypeKeyword,
    obj: &Map<String, Value>,
    path: &FieldPath,
) -> Result<SchemaNode, CompileError> {
    let primitive = |p: PrimitiveType| -> Result<SchemaNode, CompileError> {
        Ok(SchemaNode::Primitive(p))
    };
    match keyword {
        TypeKeyword::String => primitive(PrimitiveType::String),
        TypeKeyword::Boolean => primitive(PrimitiveType::Boolean),
        TypeKeyword::Integer => primitive(PrimitiveType::Integer),
        TypeKeyword::Number => primitive(PrimitiveType::Number),
        TypeKeyword::Float => primitive(PrimitiveType::Float),
        TypeKeyword::Date => primitive(PrimitiveType::Date),
        TypeKeyword::Datetime => primitive(PrimitiveType::Datetime),
        TypeKeyword::Timestamp => primitive(PrimitiveType::Timestamp),
        TypeKeyword::Long => primitive(PrimitiveType::Long),
        TypeKeyword::Array => {
            let items = obj
                .get("items")
                .ok_or_else(|| CompileError::malformed(path, "array is missing `items`"))?;
            let item = SchemaNode::parse(items, &path.child("items"))?;
            Ok(SchemaNode::Array(Box::new(item)))
        }
        TypeKeyword::Object => {
            let props = properties(keyword, obj, path)?;
            parse_fields(props, path).map(SchemaNode::Struct)
        }
        TypeKeyword::Decimal => {
            let props = properties(keyword, obj, path)?;
            Ok(SchemaNode::Decimal {
                precision: decimal_param(props, "precision", path)?,
                scale: decimal_param(props, "scale", path)?,
            })
        }
        TypeKeyword::Map => {
            let props = properties(keyword, obj, path)?;
            let key = required(props, "key", keyword, path)?;
            let value = required(props, "value", keyword, path)?;
            Ok(SchemaNode::Map {
                key: Box::new(SchemaNode::parse(key, &path.child("key"))?),
                value: Box::new(SchemaNode::parse(value, &path.child("value"))?),
            })
        }
        TypeKeyword::Null => Ok(SchemaNode::Null),
    }
}

fn properties<'a>(
    keyword: TypeKeyword,
    obj: &'a Map<String, Value>,
    path: &FieldPath,
) -> Result<&'a Map<String, Value>, CompileError> {
    match obj.get("properties") {
        Some(Value::Object(props)) => Ok(props),
        Some(other) => Err(CompileError::malformed(
            path,
            format!(
                "{keyword} `properties` must be an object, found {}",
                json_kind(other)
            ),
        )),
        None => Err(CompileError::malformed(
            path,
            format!("{keyword} is missing `properties`"),
        )),
    }
}

fn required<'a>(
    props: &'a Map<String, Value>,
    name: &str,
    keyword: TypeKeyword,
    path: &FieldPath,
) -> Result<&'a Value, CompileError> {
    props
        .get(name)
        .ok_or_else(|| CompileError::malformed(path, format!("{keyword} is missing `{name}`")))
}

/// Read a decimal precision or scale, coercing to a non-negative integer.
///
/// Integral JSON numbers are taken as-is, floating-point numbers are
/// truncated toward zero (`10.0` → `10`), and strings holding an integer
/// are parsed.
fn decimal_param(
    props: &Map<String, Value>,
    name: &str,
    path: &FieldPath,
) -> Result<u32, CompileError> {
    let value = required(props, name, TypeKeyword::Decimal, path)?;
    let invalid = |found: &dyn std::fmt::Display| {
        CompileError::malformed(
            path,
            format!("decimal `{name}` must be a non-negative integer, found {found}"),
        )
    };
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).map_err(|_| invalid(n))
            } else if let Some(f) = n.as_f64() {
                let truncated = f.trunc();
                if truncated.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&truncated) {
                    Ok(truncated as u32)
                } else {
                    Err(invalid(n))
                }
            } else {
                Err(invalid(n))
            }
        }
        Value::String(s) => s.trim().parse::<u32>().map_err(|_| invalid(&format!("{s:?}"))),
        other => Err(invalid(&json_kind(other))),
    }
}

/// JSON kind of a value, for diagnostics.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
