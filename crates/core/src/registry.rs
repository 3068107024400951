//! Feature registry
//!
//! Process-scoped lookup table from feature id to [`Feature`], populated once
//! while the plan is built and append-only for the life of the process.
//! Iteration order is registration order, which keeps every walk over the
//! registry deterministic.

use crate::errors::{RegistryError, Result};
use crate::feature::Feature;
use indexmap::IndexMap;

/// Append-only id → feature table
#[derive(Debug, Default)]
pub struct FeatureRegistry {
    features: IndexMap<String, Feature>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a feature by id
    pub fn register(&mut self, feature: Feature) -> Result<()> {
        if self.features.contains_key(feature.id()) {
            return Err(RegistryError::DuplicateFeature {
                id: feature.id().to_string(),
            }
            .into());
        }
        self.features.insert(feature.id().to_string(), feature);
        Ok(())
    }

    /// Look up a feature by id
    pub fn get(&self, id: &str) -> Result<&Feature> {
        self.features.get(id).ok_or_else(|| {
            RegistryError::UnknownFeature { id: id.to_string() }.into()
        })
    }

    /// Whether a feature with this id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.features.contains_key(id)
    }

    /// All features, in registration order
    pub fn all(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    /// Number of registered features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
