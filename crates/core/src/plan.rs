//! Feature plan
//!
//! The plan is the static wiring step: it declares, once, which features
//! belong to which sets, which blueprints back which features, and what
//! dependency/conflict/ordering edges exist. Building the plan validates
//! every referenced id, makes the conflict relation symmetric, and rejects
//! ordering cycles, all before a single feature exists in the registry, so
//! no side effect can precede a wiring error.
//!
//! The built plan is read-only: features and sets are created once and their
//! relational fields never change afterward.

use crate::blueprint::Blueprint;
use crate::errors::{PlanError, Result};
use crate::feature::Feature;
use crate::registry::FeatureRegistry;
use crate::set::FeatureSet;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// Declaration of a single feature, accumulated by the builder
#[derive(Debug)]
pub struct FeatureDecl {
    id: String,
    parent_set: String,
    default_enabled: bool,
    requires: Vec<String>,
    conflicts_with: Vec<String>,
    activates_after: Vec<String>,
    blueprints: Vec<Box<dyn Blueprint>>,
}

impl FeatureDecl {
    /// Require another feature to be enabled
    pub fn requires(&mut self, id: &str) -> &mut Self {
        self.requires.push(id.to_string());
        self
    }

    /// Declare mutual exclusion with another feature
    ///
    /// The relation is symmetric; the build step mirrors it onto the other
    /// feature.
    pub fn conflicts_with(&mut self, id: &str) -> &mut Self {
        self.conflicts_with.push(id.to_string());
        self
    }

    /// Declare a soft ordering edge: if the other feature is enabled, it
    /// completes activation before this one
    pub fn activates_after(&mut self, id: &str) -> &mut Self {
        self.activates_after.push(id.to_string());
        self
    }

    /// Enable this feature unless configuration disables it
    pub fn enabled_by_default(&mut self) -> &mut Self {
        self.default_enabled = true;
        self
    }

    /// Attach a blueprint; blueprints run in attachment order
    pub fn blueprint(&mut self, blueprint: impl Blueprint + 'static) -> &mut Self {
        self.blueprints.push(Box::new(blueprint));
        self
    }
}

/// Accumulates set and feature declarations
#[derive(Debug, Default)]
pub struct FeaturePlanBuilder {
    sets: Vec<String>,
    features: Vec<FeatureDecl>,
}

impl FeaturePlanBuilder {
    /// Declare a feature set
    pub fn set(&mut self, id: &str) -> &mut Self {
        self.sets.push(id.to_string());
        self
    }

    /// Declare a feature belonging to `parent_set`
    pub fn feature(&mut self, id: &str, parent_set: &str) -> &mut FeatureDecl {
        self.features.push(FeatureDecl {
            id: id.to_string(),
            parent_set: parent_set.to_string(),
            default_enabled: false,
            requires: Vec::new(),
            conflicts_with: Vec::new(),
            activates_after: Vec::new(),
            blueprints: Vec::new(),
        });
        // Just pushed, so the vector is non-empty.
        let index = self.features.len() - 1;
        &mut self.features[index]
    }

    /// Validate the declarations and produce the immutable plan
    pub fn build(self) -> Result<FeaturePlan> {
        debug!(
            "Building feature plan: {} sets, {} features",
            self.sets.len(),
            self.features.len()
        );

        let mut set_ids: HashSet<&str> = HashSet::new();
        for set in &self.sets {
            if !set_ids.insert(set) {
                return Err(PlanError::DuplicateSet { id: set.clone() }.into());
            }
        }

        let feature_ids: HashSet<&str> =
            self.features.iter().map(|f| f.id.as_str()).collect();
        for decl in &self.features {
            if !set_ids.contains(decl.parent_set.as_str()) {
                return Err(PlanError::UnknownParentSet {
                    feature: decl.id.clone(),
                    set: decl.parent_set.clone(),
                }
                .into());
            }
            for reference in decl
                .requires
                .iter()
                .chain(&decl.conflicts_with)
                .chain(&decl.activates_after)
            {
                if !feature_ids.contains(reference.as_str()) {
                    return Err(PlanError::UnknownFeature {
                        feature: decl.id.clone(),
                        reference: reference.clone(),
                    }
                    .into());
                }
            }
        }

        let ordering: IndexMap<String, Vec<String>> = self
            .features
            .iter()
            .map(|f| (f.id.clone(), f.activates_after.clone()))
            .collect();
        if let Some(cycle) = find_cycle(&ordering) {
            return Err(PlanError::DependencyCycle {
                cycle_path: cycle.join(" -> "),
            }
            .into());
        }

        // Mirror conflicts so the relation is symmetric.
        let mut mirrored: IndexMap<String, Vec<String>> = IndexMap::new();
        for decl in &self.features {
            for other in &decl.conflicts_with {
                mirrored
                    .entry(other.clone())
                    .or_default()
                    .push(decl.id.clone());
            }
        }

        let mut registry = FeatureRegistry::new();
        let mut members: IndexMap<String, Vec<String>> = self
            .sets
            .iter()
            .map(|id| (id.clone(), Vec::new()))
            .collect();

        for decl in self.features {
            let mut conflicts = decl.conflicts_with;
            for other in mirrored.get(&decl.id).into_iter().flatten() {
                if !conflicts.contains(other) {
                    conflicts.push(other.clone());
                }
            }
            if let Some(set_members) = members.get_mut(&decl.parent_set) {
                set_members.push(decl.id.clone());
            }
            registry.register(Feature::new(
                decl.id,
                decl.parent_set,
                decl.default_enabled,
                decl.requires,
                conflicts,
                decl.activates_after,
                decl.blueprints,
            ))?;
        }

        let sets = members
            .into_iter()
            .map(|(id, member_ids)| {
                let set = FeatureSet::new(id.clone(), member_ids);
                (id, set)
            })
            .collect();

        Ok(FeaturePlan { registry, sets })
    }
}

/// The immutable wiring of sets, features, and their relations
#[derive(Debug)]
pub struct FeaturePlan {
    registry: FeatureRegistry,
    sets: IndexMap<String, FeatureSet>,
}

impl FeaturePlan {
    pub fn builder() -> FeaturePlanBuilder {
        FeaturePlanBuilder::default()
    }

    /// The registry holding every declared feature
    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    /// Look up a feature by id
    pub fn feature(&self, id: &str) -> Result<&Feature> {
        self.registry.get(id)
    }

    /// Look up a set by id
    pub fn set(&self, id: &str) -> Result<&FeatureSet> {
        self.sets
            .get(id)
            .ok_or_else(|| PlanError::UnknownSet { id: id.to_string() }.into())
    }

    /// All sets, in declaration order
    pub fn sets(&self) -> impl Iterator<Item = &FeatureSet> {
        self.sets.values()
    }
}

/// DFS cycle search over the ordering graph
///
/// Returns the cycle path (first node repeated at the end) when one exists.
fn find_cycle(graph: &IndexMap<String, Vec<String>>) -> Option<Vec<String>> {
    let mut visited = HashSet::new();
    let mut stack = HashSet::new();
    let mut path = Vec::new();

    for node in graph.keys() {
        if !visited.contains(node.as_str()) {
            if let Some(cycle) = dfs_find_cycle(node, graph, &mut visited, &mut stack, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn dfs_find_cycle(
    node: &str,
    graph: &IndexMap<String, Vec<String>>,
    visited: &mut HashSet<String>,
    stack: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> Option<Vec<String>> {
    visited.insert(node.to_string());
    stack.insert(node.to_string());
    path.push(node.to_string());

    if let Some(successors) = graph.get(node) {
        for next in successors {
            if !visited.contains(next.as_str()) {
                if let Some(cycle) = dfs_find_cycle(next, graph, visited, stack, path) {
                    return Some(cycle);
                }
            } else if stack.contains(next.as_str()) {
                let cycle_start = path.iter().position(|n| n == next).unwrap_or(0);
                let mut cycle = path[cycle_start..].to_vec();
                cycle.push(next.clone());
                return Some(cycle);
            }
        }
    }

    path.pop();
    stack.remove(node);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::KilnError;

    #[test]
    fn test_build_simple_plan() {
        let mut builder = FeaturePlan::builder();
        builder.set("general");
        builder.feature("bootstrap", "general");
        builder.feature("git", "general");

        let plan = builder.build().unwrap();
        assert_eq!(plan.registry().len(), 2);
        assert_eq!(plan.set("general").unwrap().members(), &["bootstrap", "git"]);
        assert!(plan.feature("git").unwrap().is_parent("general"));
    }

    #[test]
    fn test_duplicate_set_fails() {
        let mut builder = FeaturePlan::builder();
        builder.set("general");
        builder.set("general");

        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            KilnError::Plan(PlanError::DuplicateSet { .. })
        ));
    }

    #[test]
    fn test_unknown_parent_set_fails() {
        let mut builder = FeaturePlan::builder();
        builder.set("general");
        builder.feature("git", "missing");

        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            KilnError::Plan(PlanError::UnknownParentSet { .. })
        ));
    }

    #[test]
    fn test_unknown_relation_reference_fails() {
        let mut builder = FeaturePlan::builder();
        builder.set("app");
        builder.feature("lint", "app").activates_after("test");

        let err = builder.build().unwrap_err();
        match err {
            KilnError::Plan(PlanError::UnknownFeature { feature, reference }) => {
                assert_eq!(feature, "lint");
                assert_eq!(reference, "test");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ordering_cycle_fails_at_construction() {
        let mut builder = FeaturePlan::builder();
        builder.set("app");
        builder.feature("a", "app").activates_after("b");
        builder.feature("b", "app").activates_after("c");
        builder.feature("c", "app").activates_after("a");

        let err = builder.build().unwrap_err();
        match err {
            KilnError::Plan(PlanError::DependencyCycle { cycle_path }) => {
                assert!(cycle_path.contains(" -> "));
                let first = cycle_path.split(" -> ").next().unwrap();
                assert!(cycle_path.ends_with(first));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let mut builder = FeaturePlan::builder();
        builder.set("app");
        builder.feature("a", "app").activates_after("a");

        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            KilnError::Plan(PlanError::DependencyCycle { .. })
        ));
    }

    #[test]
    fn test_conflicts_are_mirrored() {
        let mut builder = FeaturePlan::builder();
        builder.set("app");
        builder.feature("application", "app").conflicts_with("library");
        builder.feature("library", "app");

        let plan = builder.build().unwrap();
        assert_eq!(
            plan.feature("library").unwrap().conflicts_with(),
            &["application"]
        );
        assert_eq!(
            plan.feature("application").unwrap().conflicts_with(),
            &["library"]
        );
    }

    #[test]
    fn test_duplicate_feature_fails() {
        let mut builder = FeaturePlan::builder();
        builder.set("general");
        builder.feature("git", "general");
        builder.feature("git", "general");

        let err = builder.build().unwrap_err();
        assert!(matches!(err, KilnError::Registry(_)));
    }

    #[test]
    fn test_unknown_set_lookup_fails() {
        let mut builder = FeaturePlan::builder();
        builder.set("general");
        let plan = builder.build().unwrap();

        assert!(matches!(
            plan.set("missing").unwrap_err(),
            KilnError::Plan(PlanError::UnknownSet { .. })
        ));
    }
}
