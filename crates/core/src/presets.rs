//! Presets
//!
//! A preset bundles a configuration decision: which features to enable and
//! which property values to seed. Applying a preset flips all of its flags
//! before any activation call, so the enabled set the pre-flight validates is
//! the one the preset meant.

use crate::errors::Result;
use crate::plan::FeaturePlan;
use crate::properties::PropertyStore;
use serde_json::Value;
use tracing::debug;

/// A named bundle of feature enablements and property values
#[derive(Debug, Clone)]
pub struct Preset {
    id: String,
    features: Vec<String>,
    properties: Vec<(String, String, Value)>,
}

impl Preset {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            features: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Preset name
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add a feature to enable
    pub fn enable(mut self, feature: &str) -> Self {
        self.features.push(feature.to_string());
        self
    }

    /// Add a property value to seed
    pub fn property(mut self, scope: &str, key: &str, value: impl Into<Value>) -> Self {
        self.properties
            .push((scope.to_string(), key.to_string(), value.into()));
        self
    }

    /// Feature ids this preset enables
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Apply the preset: seed properties, then enable every listed feature
    ///
    /// Fails if any listed feature is unknown or already activated; a preset
    /// is a configuration-time construct.
    pub fn apply(&self, plan: &FeaturePlan, store: &mut PropertyStore) -> Result<()> {
        debug!("Applying preset '{}'", self.id);
        for (scope, key, value) in &self.properties {
            store.set(scope, key, value.clone());
        }
        for feature in &self.features {
            plan.feature(feature)?.enable()?;
        }
        Ok(())
    }
}
