//! Error types and handling
//!
//! Domain-specific error enums for each part of the engine (registry, plan,
//! task graph, activation) wrapped in the main [`KilnError`] enum for unified
//! error handling. Every detected inconsistency is fatal: an inconsistent
//! feature graph would produce an inconsistent task graph, which is not safe
//! to execute. There is no warning tier and no local recovery.

use thiserror::Error;

/// Feature registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A feature with the same id was already registered
    #[error("Feature '{id}' is already registered")]
    DuplicateFeature { id: String },

    /// Lookup of an id that was never registered
    #[error("Unknown feature: '{id}'")]
    UnknownFeature { id: String },
}

/// Plan construction errors
///
/// All of these surface while the plan is being built, before any feature
/// exists in the registry and before any side effect.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A set was declared twice
    #[error("Feature set '{id}' is declared more than once")]
    DuplicateSet { id: String },

    /// A feature was assigned to a set that was never declared
    #[error("Feature '{feature}' belongs to undeclared set '{set}'")]
    UnknownParentSet { feature: String, set: String },

    /// Set lookup by an id that was never declared
    #[error("Unknown feature set: '{id}'")]
    UnknownSet { id: String },

    /// A relation references a feature that was never declared
    #[error("Feature '{feature}' references unknown feature '{reference}'")]
    UnknownFeature { feature: String, reference: String },

    /// Cycle detected in activate-after ordering
    #[error("Activation ordering cycle detected: {cycle_path}")]
    DependencyCycle { cycle_path: String },
}

/// Task graph errors
#[derive(Error, Debug)]
pub enum GraphError {
    /// A task with the same name already exists
    #[error("Task '{name}' already exists")]
    DuplicateTask { name: String },

    /// Ordering or configuration against a task that does not exist
    #[error("Unknown task: '{name}'")]
    UnknownTask { name: String },
}

/// Activation errors
#[derive(Error, Debug)]
pub enum ActivationError {
    /// Two mutually exclusive features are both enabled
    #[error("Feature '{feature}' conflicts with enabled feature '{conflicts_with}'")]
    Conflict {
        feature: String,
        conflicts_with: String,
    },

    /// An enabled feature requires a feature that is not enabled
    #[error("Feature '{feature}' requires feature '{requires}' to be enabled")]
    MissingRequirement { feature: String, requires: String },

    /// A top-level caller activated a set twice
    #[error("Feature set '{set}' was already activated")]
    SetAlreadyActivated { set: String },

    /// A direct caller activated a feature twice
    #[error("Feature '{feature}' was already activated")]
    FeatureAlreadyActivated { feature: String },

    /// Enablement changed after the feature was activated
    #[error("Feature '{feature}' is already activated; enablement can no longer change")]
    EnablementFrozen { feature: String },

    /// A blueprint precondition does not hold
    #[error("Precondition failed for feature '{feature}': {message}")]
    Precondition { feature: String, message: String },
}

/// Main error enum wrapping all domain-specific errors
#[derive(Error, Debug)]
pub enum KilnError {
    /// Feature registry errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Plan construction errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Task graph errors
    #[error("Task graph error: {0}")]
    Graph(#[from] GraphError),

    /// Activation errors
    #[error("Activation error: {0}")]
    Activation(#[from] ActivationError),
}

/// Convenience type alias for Results with KilnError
pub type Result<T> = std::result::Result<T, KilnError>;
