//! Subcommand implementations

pub mod activate;
pub mod dump;
pub mod features;
pub mod plan;

use crate::manifest::{toml_to_json, Manifest};
use anyhow::{Context, Result};
use kiln_core::builtin;
use kiln_core::plan::FeaturePlan;
use kiln_core::properties::PropertyStore;
use std::path::Path;
use tracing::debug;

/// The configured feature plan and property store every subcommand starts
/// from
pub(crate) struct Workspace {
    pub plan: FeaturePlan,
    pub store: PropertyStore,
}

/// Build the standard plan and apply the manifest to it
///
/// Order matters: the preset flips its flags first, then explicit manifest
/// flags override, then properties merge over the defaults. Everything
/// happens before any activation call.
pub(crate) fn prepare(manifest_path: &Path) -> Result<Workspace> {
    let manifest = Manifest::load_or_default(manifest_path)?;
    let plan = builtin::standard_plan()?;
    let mut store = builtin::default_properties();

    if let Some(preset_id) = &manifest.preset {
        let preset = builtin::preset(preset_id)
            .with_context(|| format!("Unknown preset '{}'", preset_id))?;
        preset.apply(&plan, &mut store)?;
        debug!("Applied preset '{}'", preset_id);
    }

    for (id, enabled) in &manifest.features {
        plan.feature(id)?.set_enabled((*enabled).into())?;
    }

    for (scope, values) in &manifest.properties {
        for (key, value) in values {
            store.set(scope, key, toml_to_json(value.clone()));
        }
    }

    Ok(Workspace { plan, store })
}
