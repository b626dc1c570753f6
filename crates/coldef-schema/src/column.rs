//! Column definitions produced by the compiler.

use std::fmt;

/// One `name type` pair of a DDL column list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    /// Sanitized identifier.
    pub name: String,
    /// DDL type, e.g. `array<string>` or `decimal(10,2)`.
    pub sql_type: String,
}

impl Column {
    /// A column from an already-sanitized name and a rendered DDL type.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.sql_type)
    }
}

/// How the name and type of each column are joined when a list is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PairStyle {
    /// `name type`, the form of a DDL column list and of implicit groupings.
    #[default]
    Spaced,
    /// `name: type`, the form of explicit object members.
    Colon,
}

/// Ordered column list; displays as `name type, name type, ...` or, in
/// [`PairStyle::Colon`], as `name: type, ...`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnList {
    columns: Vec<Column>,
    style: PairStyle,
}

impl ColumnList {
    /// A list rendered in [`PairStyle::Spaced`].
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            style: PairStyle::Spaced,
        }
    }

    /// Change how name/type pairs are joined.
    pub fn with_style(mut self, style: PairStyle) -> Self {
        self.style = style;
        self
    }

    /// The pair style used by `Display`.
    pub fn style(&self) -> PairStyle {
        self.style
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if the list has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The columns, in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Iterate over the columns in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    /// Consume the list, returning its columns.
    pub fn into_inner(self) -> Vec<Column> {
        self.columns
    }
}

impl fmt::Display for ColumnList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = match self.style {
            PairStyle::Spaced => " ",
            PairStyle::Colon => ": ",
        };
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}{separator}{}", column.name, column.sql_type)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ColumnList {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
