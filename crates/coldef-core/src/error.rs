//! # Error Types — Compile Error Taxonomy
//!
//! Defines the errors raised while compiling a table schema into a DDL
//! column list. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.
//!
//! ## Design
//!
//! - Every failure is a distinct variant; there is no partial-success mode.
//! - Node-level errors carry the [`FieldPath`] of the offending field so the
//!   caller can locate it in the source document.

use std::fmt;

use thiserror::Error;

/// Location of a node inside a schema document, rendered as a
/// JSON-Pointer-like sequence of field keys (e.g. `/other/col1`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a direct child of this node.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    /// True for the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of keys in the path; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The field keys from the root down.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "(root)");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Error raised while compiling a schema document into a column list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The node's `type` is the literal unsupported marker `"null"`.
    #[error("unsupported type 'null' at {path}")]
    UnsupportedType {
        /// Location of the offending node.
        path: FieldPath,
    },

    /// The node's `type` is outside the recognized keyword set.
    #[error("unknown type '{type_name}' at {path}")]
    UnknownType {
        /// Location of the offending node.
        path: FieldPath,
        /// The unrecognized keyword as written in the document.
        type_name: String,
    },

    /// The document root is a bare primitive, array, or map rather than a
    /// field grouping.
    #[error("invalid root type '{found}': the document root must group named fields")]
    InvalidRootType {
        /// Kind of node found at the root.
        found: String,
    },

    /// A node is missing required sibling keys or has ill-typed ones.
    #[error("malformed node at {path}: {reason}")]
    MalformedNode {
        /// Location of the offending node.
        path: FieldPath,
        /// What is wrong with the node.
        reason: String,
    },

    /// An overlay entry is not a single-entry `{ newKey: Node }` mapping, or
    /// its replacement node does not parse.
    #[error("malformed overlay entry '{key}': {reason}")]
    MalformedOverlay {
        /// The original field key the entry is registered under.
        key: String,
        /// What is wrong with the entry.
        reason: String,
    },

    /// The raw document could not be decoded.
    #[error("invalid schema document: {0}")]
    InvalidDocument(String),

    /// A CREATE TABLE statement could not be rendered.
    #[error("invalid table definition: {0}")]
    InvalidTableDefinition(String),
}

impl CompileError {
    /// Build a [`CompileError::MalformedNode`].
    pub fn malformed(path: &FieldPath, reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            path: path.clone(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_path_display() {
        let root = FieldPath::root();
        assert_eq!(root.to_string(), "(root)");
        assert_eq!(root.depth(), 0);

        let nested = root.child("other").child("col1");
        assert_eq!(nested.to_string(), "/other/col1");
        assert_eq!(nested.segments(), ["other", "col1"]);
        assert_eq!(nested.depth(), 2);
        assert!(!nested.is_root());
    }

    #[test]
    fn unknown_type_message_names_keyword_and_path() {
        let err = CompileError::UnknownType {
            path: FieldPath::root().child("x"),
            type_name: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "unknown type 'bogus' at /x");
    }

    #[test]
    fn malformed_helper_builds_variant() {
        let err = CompileError::malformed(&FieldPath::root(), "empty node");
        assert!(matches!(err, CompileError::MalformedNode { .. }));
        assert_eq!(err.to_string(), "malformed node at (root): empty node");
    }
}
