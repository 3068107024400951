//! Feature sets and cascading activation
//!
//! A feature set groups features that activate together as a unit. Asking a
//! set to activate walks its enabled, inactive members and activates each one
//! depth-first: a feature's `activates_after` predecessors complete all their
//! lifecycle phases before the feature itself begins. The walk may cross set
//! boundaries; a predecessor in another set is activated directly.
//!
//! The set itself performs its cascade exactly once, guarded by an atomic
//! compare-and-swap. The guard exists for reentrancy (a set asked to activate
//! again while another activation is in flight on the same thread), not for
//! cross-thread contention; the whole walk is single-threaded.

use crate::context::ActivationContext;
use crate::errors::{ActivationError, Result};
use crate::feature::Feature;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// A named group of features that activate as a cascade
#[derive(Debug)]
pub struct FeatureSet {
    id: String,
    activated: AtomicBool,
    members: Vec<String>,
}

impl FeatureSet {
    pub(crate) fn new(id: String, members: Vec<String>) -> Self {
        Self {
            id,
            activated: AtomicBool::new(false),
            members,
        }
    }

    /// Set name
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Member feature ids, in declaration order
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Whether the set has performed its cascade
    pub fn is_active(&self) -> bool {
        self.activated.load(Ordering::SeqCst)
    }

    /// Activate the set, failing if it was already activated
    ///
    /// The dependency plan assumes each top-level activation request is made
    /// exactly once per set, so a second call is a caller bug, not a benign
    /// race.
    pub fn activate(&self, cx: &mut ActivationContext) -> Result<()> {
        if !self.try_activate(cx)? {
            return Err(ActivationError::SetAlreadyActivated {
                set: self.id.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Activate the set, returning whether this call performed the cascade
    ///
    /// A reentrant activation attempt is a silent no-op (`Ok(false)`). The
    /// enabled set is validated before the first cascade side effect; a
    /// conflict or missing requirement aborts with the guard untouched.
    pub fn try_activate(&self, cx: &mut ActivationContext) -> Result<bool> {
        cx.ensure_validated()?;
        if self
            .activated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(false);
        }
        debug!("Activating feature set '{}'", self.id);
        cx.trace_enter(format!("activate set '{}'", self.id));
        let result = self.cascade(cx);
        cx.trace_exit();
        result.map(|_| true)
    }

    fn cascade(&self, cx: &mut ActivationContext) -> Result<()> {
        let registry = cx.registry();
        for member in &self.members {
            let feature = registry.get(member)?;
            if feature.is_enabled() && feature.is_inactive() {
                activate_ordered(feature, cx)?;
            }
        }
        Ok(())
    }
}

/// Depth-first activation honoring `activates_after` edges
///
/// Predecessors that are enabled and inactive activate first, so every
/// ordering predecessor has completed all five lifecycle phases before
/// `feature` begins its first.
fn activate_ordered(feature: &Feature, cx: &mut ActivationContext) -> Result<()> {
    let registry = cx.registry();
    for id in feature.activates_after() {
        let predecessor = registry.get(id)?;
        if predecessor.is_enabled() && predecessor.is_inactive() {
            activate_ordered(predecessor, cx)?;
        }
    }
    feature.activate(cx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::KilnError;
    use crate::graph::TaskGraph;
    use crate::plan::FeaturePlan;
    use crate::properties::PropertyStore;

    fn two_feature_plan() -> FeaturePlan {
        let mut builder = FeaturePlan::builder();
        builder.set("general");
        builder.feature("git", "general");
        builder.feature("bootstrap", "general");
        builder.build().unwrap()
    }

    #[test]
    fn test_try_activate_returns_true_exactly_once() {
        let plan = two_feature_plan();
        let mut graph = TaskGraph::new();
        let store = PropertyStore::new();
        let mut cx = ActivationContext::new(plan.registry(), &mut graph, &store);

        let set = plan.set("general").unwrap();
        assert!(set.try_activate(&mut cx).unwrap());
        assert!(!set.try_activate(&mut cx).unwrap());
        assert!(!set.try_activate(&mut cx).unwrap());
    }

    #[test]
    fn test_second_top_level_activate_fails() {
        let plan = two_feature_plan();
        let mut graph = TaskGraph::new();
        let store = PropertyStore::new();
        let mut cx = ActivationContext::new(plan.registry(), &mut graph, &store);

        let set = plan.set("general").unwrap();
        set.activate(&mut cx).unwrap();

        let err = set.activate(&mut cx).unwrap_err();
        assert!(matches!(
            err,
            KilnError::Activation(ActivationError::SetAlreadyActivated { .. })
        ));
    }

    #[test]
    fn test_cascade_skips_disabled_members() {
        let plan = two_feature_plan();
        plan.feature("git").unwrap().enable().unwrap();

        let mut graph = TaskGraph::new();
        let store = PropertyStore::new();
        let mut cx = ActivationContext::new(plan.registry(), &mut graph, &store);

        plan.set("general").unwrap().activate(&mut cx).unwrap();

        assert!(plan.feature("git").unwrap().is_active());
        assert!(plan.feature("bootstrap").unwrap().is_inactive());
    }
}
