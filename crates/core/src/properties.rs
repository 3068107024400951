//! Property store
//!
//! Configuration values consumed by blueprints during their
//! `inject_dependencies` phase. Values are grouped into scopes (by convention
//! the feature id) and treated as already validated; blueprints supply their
//! own defaults through the `*_or` accessors.

use indexmap::IndexMap;
use serde_json::Value;

/// Scoped key-value configuration store
#[derive(Debug, Default, Clone)]
pub struct PropertyStore {
    scopes: IndexMap<String, IndexMap<String, Value>>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value within a scope, replacing any previous value
    pub fn set(&mut self, scope: &str, key: &str, value: impl Into<Value>) {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Read a value
    pub fn get(&self, scope: &str, key: &str) -> Option<&Value> {
        self.scopes.get(scope)?.get(key)
    }

    /// Read a string value, falling back to `default` when absent or not a
    /// string
    pub fn str_or(&self, scope: &str, key: &str, default: &str) -> String {
        self.get(scope, key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Read a boolean value with a default
    pub fn bool_or(&self, scope: &str, key: &str, default: bool) -> bool {
        self.get(scope, key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Read an integer value with a default
    pub fn int_or(&self, scope: &str, key: &str, default: i64) -> i64 {
        self.get(scope, key)
            .and_then(Value::as_i64)
            .unwrap_or(default)
    }

    /// Whether a scope holds any values
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains_key(scope)
    }

    /// Ordered (`scope.key`, value) pairs for reporting
    pub fn describe(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (scope, values) in &self.scopes {
            for (key, value) in values {
                pairs.push((format!("{}.{}", scope, key), value.to_string()));
            }
        }
        pairs
    }

    /// Number of values across all scopes
    pub fn len(&self) -> usize {
        self.scopes.values().map(IndexMap::len).sum()
    }

    /// Whether the store holds no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
