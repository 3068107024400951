//! Project manifest
//!
//! The `kiln.toml` manifest carries the configuration input: an optional
//! preset, explicit feature flags, and property values. Flags resolve before
//! any activation call; an explicit flag overrides whatever a preset decided.
//!
//! ```toml
//! preset = "app"
//!
//! [features]
//! container = false
//! docs = true
//!
//! [properties.project]
//! name = "demo"
//! version = "1.0.0"
//! ```

use anyhow::{Context, Result};
use kiln_core::IndexMap;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Parsed `kiln.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Preset applied before explicit flags
    pub preset: Option<String>,
    /// Explicit per-feature flags
    #[serde(default)]
    pub features: IndexMap<String, bool>,
    /// Property values, grouped by scope
    #[serde(default)]
    pub properties: IndexMap<String, IndexMap<String, toml::Value>>,
}

impl Manifest {
    /// Load and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let manifest = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))?;
        Ok(manifest)
    }

    /// Load a manifest, falling back to the empty default when the file is
    /// absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("Manifest {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

/// Convert a TOML value into the JSON value type the property store uses
pub fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(values) => {
            serde_json::Value::Array(values.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
