//! Feature nodes
//!
//! A feature is a toggleable unit of build capability: identity, tri-state
//! enablement, a one-shot activation guard, and its relations to other
//! features (`requires`, `conflicts_with`, `activates_after`). Activating a
//! feature drives its attached blueprints through the five lifecycle phases,
//! phase-major: all blueprints complete one phase before the next phase
//! starts, so task existence is established across the whole feature before
//! any of its blueprints configures.
//!
//! Relational fields are fixed at plan construction. Only `enabled` (during
//! configuration, before the walk) and `activated` (during the walk, exactly
//! once) change over a feature's lifetime.

use crate::blueprint::Blueprint;
use crate::context::ActivationContext;
use crate::errors::{ActivationError, Result};
use crate::flag::Flag;
use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// A node in the feature graph
#[derive(Debug)]
pub struct Feature {
    id: String,
    parent_set: String,
    default_enabled: bool,
    enabled: Cell<Flag>,
    activated: AtomicBool,
    requires: Vec<String>,
    conflicts_with: Vec<String>,
    activates_after: Vec<String>,
    blueprints: RefCell<Vec<Box<dyn Blueprint>>>,
}

impl Feature {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        parent_set: String,
        default_enabled: bool,
        requires: Vec<String>,
        conflicts_with: Vec<String>,
        activates_after: Vec<String>,
        blueprints: Vec<Box<dyn Blueprint>>,
    ) -> Self {
        Self {
            id,
            parent_set,
            default_enabled,
            enabled: Cell::new(Flag::Unset),
            activated: AtomicBool::new(false),
            requires,
            conflicts_with,
            activates_after,
            blueprints: RefCell::new(blueprints),
        }
    }

    /// Stable identity, unique within the registry
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The set this feature belongs to for cascade activation
    pub fn parent_set(&self) -> &str {
        &self.parent_set
    }

    /// Whether this feature belongs to the given set
    pub fn is_parent(&self, set_id: &str) -> bool {
        self.parent_set == set_id
    }

    /// Features that must be enabled for this feature to activate
    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    /// Features that must not be enabled at the same time
    pub fn conflicts_with(&self) -> &[String] {
        &self.conflicts_with
    }

    /// Features that, if enabled, complete activation before this one
    pub fn activates_after(&self) -> &[String] {
        &self.activates_after
    }

    /// Explicitly enable the feature
    pub fn enable(&self) -> Result<()> {
        self.set_enabled(Flag::Enabled)
    }

    /// Explicitly disable the feature
    pub fn disable(&self) -> Result<()> {
        self.set_enabled(Flag::Disabled)
    }

    /// Set the tri-state enablement flag
    ///
    /// Enablement is fixed before the graph is walked; changing it after
    /// activation fails with [`ActivationError::EnablementFrozen`].
    pub fn set_enabled(&self, flag: Flag) -> Result<()> {
        if self.is_active() {
            return Err(ActivationError::EnablementFrozen {
                feature: self.id.clone(),
            }
            .into());
        }
        self.enabled.set(flag);
        Ok(())
    }

    /// The raw tri-state flag
    pub fn enabled_flag(&self) -> Flag {
        self.enabled.get()
    }

    /// Resolve the tri-state flag against this feature's default policy
    pub fn is_enabled(&self) -> bool {
        self.enabled.get().resolve(self.default_enabled)
    }

    /// Whether the feature has run its lifecycle
    pub fn is_active(&self) -> bool {
        self.activated.load(Ordering::SeqCst)
    }

    /// Whether the feature has not yet run its lifecycle
    pub fn is_inactive(&self) -> bool {
        !self.is_active()
    }

    /// Run this feature's blueprint lifecycle, exactly once
    ///
    /// The cascading walk filters on [`is_inactive`](Self::is_inactive)
    /// before calling, so a feature reached over several ordering paths is a
    /// silent no-op after the first. A direct caller invoking this twice
    /// gets [`ActivationError::FeatureAlreadyActivated`].
    pub fn activate(&self, cx: &mut ActivationContext) -> Result<()> {
        if self
            .activated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ActivationError::FeatureAlreadyActivated {
                feature: self.id.clone(),
            }
            .into());
        }
        debug!("Activating feature '{}'", self.id);
        cx.trace_enter(format!("feature '{}'", self.id));
        let result = self.run_lifecycle(cx);
        cx.trace_exit();
        result
    }

    fn run_lifecycle(&self, cx: &mut ActivationContext) -> Result<()> {
        let mut blueprints = self.blueprints.borrow_mut();
        if blueprints.is_empty() {
            return Ok(());
        }
        cx.trace_record("check-preconditions".to_string());
        for blueprint in blueprints.iter() {
            blueprint.check_preconditions(cx)?;
        }
        cx.trace_record("apply-plugins".to_string());
        for blueprint in blueprints.iter_mut() {
            blueprint.apply_plugins(cx)?;
        }
        cx.trace_record("create-tasks".to_string());
        for blueprint in blueprints.iter_mut() {
            blueprint.create_tasks(cx)?;
        }
        cx.trace_record("inject-dependencies".to_string());
        for blueprint in blueprints.iter_mut() {
            blueprint.inject_dependencies(cx)?;
        }
        cx.trace_record("configure".to_string());
        for blueprint in blueprints.iter_mut() {
            blueprint.configure(cx)?;
        }
        Ok(())
    }
}
