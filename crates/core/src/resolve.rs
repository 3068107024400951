//! Enabled-set resolution
//!
//! Two read-only views over the feature graph: the hard pre-flight that
//! validates the fully resolved enabled set (conflicts and requirements)
//! before any activation side effect, and a side-effect-free simulation of
//! the cascade that yields the deterministic activation order without running
//! a single lifecycle phase.

use crate::errors::{ActivationError, Result};
use crate::feature::Feature;
use crate::plan::FeaturePlan;
use crate::registry::FeatureRegistry;
use std::collections::HashSet;
use tracing::debug;

/// Validate the enabled set against conflict and requirement relations
///
/// For every enabled feature, every conflicting feature must be disabled and
/// every required feature enabled. Checked against the full enabled set, not
/// incrementally: a violation discovered mid-walk could leave tasks already
/// created on the host graph with no clean way to retract them.
pub fn validate_enabled(registry: &FeatureRegistry) -> Result<()> {
    for feature in registry.all() {
        if !feature.is_enabled() {
            continue;
        }
        for other in feature.conflicts_with() {
            if registry.get(other)?.is_enabled() {
                return Err(ActivationError::Conflict {
                    feature: feature.id().to_string(),
                    conflicts_with: other.clone(),
                }
                .into());
            }
        }
        for required in feature.requires() {
            if !registry.get(required)?.is_enabled() {
                return Err(ActivationError::MissingRequirement {
                    feature: feature.id().to_string(),
                    requires: required.clone(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Compute the order in which features would activate, without side effects
///
/// Walks the given sets exactly like the cascade does (members in
/// declaration order, `activates_after` predecessors depth-first) but
/// records ids instead of running lifecycles. Validates the enabled set
/// first, like any activation entry point.
pub fn activation_order(plan: &FeaturePlan, set_ids: &[&str]) -> Result<Vec<String>> {
    validate_enabled(plan.registry())?;

    let mut order = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for set_id in set_ids {
        let set = plan.set(set_id)?;
        for member in set.members() {
            let feature = plan.registry().get(member)?;
            if feature.is_enabled() && !seen.contains(member) {
                visit(plan.registry(), feature, &mut order, &mut seen)?;
            }
        }
    }
    debug!("Resolved activation order: {:?}", order);
    Ok(order)
}

fn visit(
    registry: &FeatureRegistry,
    feature: &Feature,
    order: &mut Vec<String>,
    seen: &mut HashSet<String>,
) -> Result<()> {
    for id in feature.activates_after() {
        let predecessor = registry.get(id)?;
        if predecessor.is_enabled() && !seen.contains(id) {
            visit(registry, predecessor, order, seen)?;
        }
    }
    if seen.insert(feature.id().to_string()) {
        order.push(feature.id().to_string());
    }
    Ok(())
}
