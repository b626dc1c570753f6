//! # Mapping Overlays
//!
//! Caller-supplied field renames and type substitutions, applied while the
//! type mapper walks the schema tree.
//!
//! ```text
//! Overlay := { <originalKey>: { <newKey>: Node }, ... }
//! ```
//!
//! Each entry is a single-entry mapping: its sole key becomes the emitted
//! column name and its sole value is a replacement node, parsed with the
//! same grammar as document nodes. When a field is replaced, its original
//! subtree is never mapped.
//!
//! ## Scope
//!
//! Lookup is by key only. Under [`OverlayScope::AnyDepth`] (the default) an
//! entry applies to every direct child of any struct or grouping whose key
//! matches, however deep, including children of replacement nodes. An entry
//! meant for one top-level field therefore also rewrites a nested field of
//! the same name. [`OverlayScope::RootOnly`] restricts lookup to the direct
//! children of the document root.

use std::collections::HashMap;

use coldef_core::{CompileError, FieldPath};
use serde_json::Value;

use crate::node::{json_kind, SchemaNode};

/// Where in the tree overlay entries are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayScope {
    /// Every struct/grouping child, at any depth.
    #[default]
    AnyDepth,
    /// Only direct children of the document root.
    RootOnly,
}

/// Replacement for one field: the new column key and its type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEntry {
    /// Key emitted in place of the original field key.
    pub key: String,
    /// Type definition used in place of the original subtree.
    pub node: SchemaNode,
}

/// Outcome of resolving one child key against an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedChild<'a> {
    /// No entry applies; use the original key and subtree.
    Original,
    /// An entry applies; use its key and node.
    Replaced {
        key: &'a str,
        node: &'a SchemaNode,
    },
}

/// Read-only table of field overrides for one compile call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOverlay {
    entries: HashMap<String, OverlayEntry>,
    scope: OverlayScope,
}

impl MappingOverlay {
    /// An overlay with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an overlay from a decoded JSON value.
    pub fn from_value(value: &Value) -> Result<Self, CompileError> {
        let Some(obj) = value.as_object() else {
            return Err(CompileError::MalformedOverlay {
                key: String::new(),
                reason: format!("overlay must be an object, found {}", json_kind(value)),
            });
        };

        let mut overlay = Self::new();
        for (original, entry) in obj {
            let Some(replacement) = entry.as_object() else {
                return Err(CompileError::MalformedOverlay {
                    key: original.clone(),
                    reason: format!(
                        "entry must be a {{ newKey: Node }} object, found {}",
                        json_kind(entry)
                    ),
                });
            };
            let mut iter = replacement.iter();
            let (Some((new_key, definition)), None) = (iter.next(), iter.next()) else {
                return Err(CompileError::MalformedOverlay {
                    key: original.clone(),
                    reason: format!(
                        "entry must have exactly one replacement key, found {}",
                        replacement.len()
                    ),
                });
            };
            let path = FieldPath::root().child(original).child(new_key);
            let node = SchemaNode::parse(definition, &path)?;
            overlay.insert(original.clone(), new_key.clone(), node);
        }
        Ok(overlay)
    }

    /// Parse an overlay from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CompileError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            CompileError::MalformedOverlay {
                key: String::new(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;
        Self::from_value(&value)
    }

    /// Parse an overlay from a YAML document.
    ///
    /// The YAML is decoded straight into a JSON value tree with mapping
    /// order kept, so YAML and JSON overlays behave identically.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CompileError> {
        let value: Value = serde_yaml::from_str(yaml).map_err(|e| CompileError::MalformedOverlay {
            key: String::new(),
            reason: format!("invalid YAML: {e}"),
        })?;
        Self::from_value(&value)
    }

    /// Set the lookup scope.
    pub fn with_scope(mut self, scope: OverlayScope) -> Self {
        self.scope = scope;
        self
    }

    /// Register a replacement for `original`, overwriting any earlier one.
    pub fn insert(&mut self, original: impl Into<String>, key: impl Into<String>, node: SchemaNode) {
        self.entries.insert(
            original.into(),
            OverlayEntry {
                key: key.into(),
                node,
            },
        );
    }

    /// The lookup scope.
    pub fn scope(&self) -> OverlayScope {
        self.scope
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the overlay has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry registered for `original`, regardless of scope.
    pub fn get(&self, original: &str) -> Option<&OverlayEntry> {
        self.entries.get(original)
    }

    /// Resolve the child `key` of the node at `parent`.
    pub fn resolve_child(&self, key: &str, parent: &FieldPath) -> ResolvedChild<'_> {
        if self.scope == OverlayScope::RootOnly && !parent.is_root() {
            return ResolvedChild::Original;
        }
        match self.entries.get(key) {
            Some(entry) => ResolvedChild::Replaced {
                key: &entry.key,
                node: &entry.node,
            },
            None => ResolvedChild::Original,
        }
    }
}

/// Resolve a child key against an optional overlay. A missing overlay
/// always yields [`ResolvedChild::Original`].
pub fn resolve_child<'a>(
    key: &str,
    parent: &FieldPath,
    overlay: Option<&'a MappingOverlay>,
) -> ResolvedChild<'a> {
    overlay.map_or(ResolvedChild::Original, |o| o.resolve_child(key, parent))
}
