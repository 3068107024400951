//! Blueprint lifecycle contract
//!
//! A blueprint is the behavior attached to a feature. When the feature
//! activates, the engine drives the blueprint through five phases, strictly
//! in order, all for one feature before the next feature starts:
//!
//! 1. [`check_preconditions`](Blueprint::check_preconditions) - validate
//!    external state; no task graph mutation yet (enforced by the shared
//!    borrow).
//! 2. [`apply_plugins`](Blueprint::apply_plugins) - register third-party
//!    extensions on the host graph; must be idempotent.
//! 3. [`create_tasks`](Blueprint::create_tasks) - add tasks and their
//!    inter-task ordering.
//! 4. [`inject_dependencies`](Blueprint::inject_dependencies) - bind values
//!    from the property store into the blueprint.
//! 5. [`configure`](Blueprint::configure) - finalize task parameters using
//!    the injected values; may reference tasks created by features that
//!    activated earlier.
//!
//! Task existence is established before any feature can reference another
//! feature's tasks by name, and values are bound before being read. Phase
//! failures propagate unmodified; a half-configured build is not safe to
//! continue.

use crate::context::ActivationContext;
use crate::errors::Result;

/// Lifecycle-bound behavior attached to a feature
///
/// All phases default to no-ops; a blueprint implements only the phases it
/// needs.
pub trait Blueprint: std::fmt::Debug {
    /// Short name used in traces and error messages
    fn name(&self) -> &str;

    /// Validate that required external state holds
    fn check_preconditions(&self, cx: &ActivationContext) -> Result<()> {
        let _ = cx;
        Ok(())
    }

    /// Register third-party extensions on the host graph
    fn apply_plugins(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let _ = cx;
        Ok(())
    }

    /// Add tasks to the host graph and declare their ordering
    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let _ = cx;
        Ok(())
    }

    /// Bind configuration values from the property store
    fn inject_dependencies(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let _ = cx;
        Ok(())
    }

    /// Finalize task parameters using the injected values
    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let _ = cx;
        Ok(())
    }
}
