//! # Table Manifest
//!
//! YAML configuration listing the tables `coldef build` compiles.
//!
//! ```yaml
//! database: analytics
//! tables:
//!   - name: events
//!     schema: schemas/events.json
//!     overlay: overlays/events.yaml
//!     overlay_scope: any_depth
//!     location: s3://bucket/events/
//!     partitioned_by: ["day(ts)"]
//!     properties:
//!       format: parquet
//! ```
//!
//! Relative `schema` and `overlay` paths resolve against the directory that
//! holds the manifest.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use coldef_schema::{MappingOverlay, OverlayScope};

/// Default manifest filename.
pub const DEFAULT_MANIFEST: &str = "coldef.yaml";

/// Top-level manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Database applied to tables that do not name their own.
    #[serde(default)]
    pub database: Option<String>,
    pub tables: Vec<TableConfig>,
}

/// One table definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub name: String,
    #[serde(default)]
    pub database: Option<String>,
    /// Path to the JSON schema document.
    pub schema: PathBuf,
    /// Optional overlay file (JSON if it ends in `.json`, YAML otherwise).
    #[serde(default)]
    pub overlay: Option<PathBuf>,
    #[serde(default)]
    pub overlay_scope: ScopeConfig,
    pub location: String,
    #[serde(default)]
    pub partitioned_by: Vec<String>,
    /// Extra `TBLPROPERTIES`; emitted in key order.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Serialized form of [`OverlayScope`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeConfig {
    #[default]
    AnyDepth,
    RootOnly,
}

impl From<ScopeConfig> for OverlayScope {
    fn from(scope: ScopeConfig) -> Self {
        match scope {
            ScopeConfig::AnyDepth => OverlayScope::AnyDepth,
            ScopeConfig::RootOnly => OverlayScope::RootOnly,
        }
    }
}

impl Manifest {
    /// Load a manifest and resolve its relative paths.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        let mut manifest: Manifest = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse manifest {}", path.display()))?;

        let mut seen = std::collections::HashSet::new();
        for table in &manifest.tables {
            if !seen.insert(table.name.as_str()) {
                bail!("duplicate table '{}' in {}", table.name, path.display());
            }
        }

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for table in &mut manifest.tables {
            table.schema = resolve_relative(&table.schema, base);
            table.overlay = table.overlay.as_deref().map(|p| resolve_relative(p, base));
        }
        tracing::debug!(
            manifest = %path.display(),
            tables = manifest.tables.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Database for `table`, falling back to the manifest default.
    pub fn database_for<'a>(&'a self, table: &'a TableConfig) -> Option<&'a str> {
        table.database.as_deref().or(self.database.as_deref())
    }
}

fn resolve_relative(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Load an overlay file. `.json` files are parsed as JSON, anything else
/// as YAML.
pub fn load_overlay(path: &Path, scope: OverlayScope) -> Result<MappingOverlay> {
    let content = std::fs::read(path)
        .with_context(|| format!("failed to read overlay {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let overlay = if is_json {
        MappingOverlay::from_slice(&content)
    } else {
        let text = String::from_utf8(content)
            .with_context(|| format!("overlay {} is not UTF-8", path.display()))?;
        MappingOverlay::from_yaml_str(&text)
    }
    .with_context(|| format!("invalid overlay {}", path.display()))?;
    Ok(overlay.with_scope(scope))
}
