//! Host build graph
//!
//! The activation engine configures an external build system. This module
//! models the slice of that system the engine needs: named units of work with
//! ordering relations between them, plus the set of third-party extensions
//! ("plugins") that have been applied to the graph. Blueprints create tasks
//! during their `create_tasks` phase and mutate task settings during
//! `configure`.
//!
//! Maps are insertion-ordered so that reports and dumps are deterministic.

use crate::errors::{GraphError, Result};
use indexmap::{map::Entry, IndexMap, IndexSet};
use serde_json::Value;

/// A named unit of work on the host build graph
#[derive(Debug, Clone)]
pub struct Task {
    name: String,
    description: String,
    runs_after: IndexSet<String>,
    settings: IndexMap<String, Value>,
}

impl Task {
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            runs_after: IndexSet::new(),
            settings: IndexMap::new(),
        }
    }

    /// Task name, unique within the graph
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Names of tasks that must run before this one
    pub fn runs_after(&self) -> impl Iterator<Item = &str> {
        self.runs_after.iter().map(String::as_str)
    }

    /// Set a configuration value on the task
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.settings.insert(key.to_string(), value.into());
    }

    /// Read a configuration value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Ordered (key, value) pairs for reporting
    pub fn describe(&self) -> Vec<(String, String)> {
        self.settings
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

/// In-memory host build graph
///
/// Supports exactly the operations blueprints need: create a named task,
/// declare ordering between tasks, look a task up by name, and apply plugins
/// idempotently.
#[derive(Debug, Default)]
pub struct TaskGraph {
    tasks: IndexMap<String, Task>,
    plugins: IndexSet<String>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a plugin to the graph. Returns `true` if it was newly applied,
    /// `false` if it was already present. Applying twice never
    /// double-registers.
    pub fn apply_plugin(&mut self, id: &str) -> bool {
        self.plugins.insert(id.to_string())
    }

    /// Whether a plugin has been applied
    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.contains(id)
    }

    /// Applied plugins in application order
    pub fn plugins(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(String::as_str)
    }

    /// Create a new task. Task names are unique.
    pub fn create_task(&mut self, name: &str, description: &str) -> Result<&mut Task> {
        match self.tasks.entry(name.to_string()) {
            Entry::Occupied(_) => Err(GraphError::DuplicateTask {
                name: name.to_string(),
            }
            .into()),
            Entry::Vacant(entry) => Ok(entry.insert(Task::new(name, description))),
        }
    }

    /// Look up a task, failing if it does not exist
    pub fn task(&self, name: &str) -> Result<&Task> {
        self.tasks.get(name).ok_or_else(|| {
            GraphError::UnknownTask {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Mutable task lookup, failing if it does not exist
    pub fn task_mut(&mut self, name: &str) -> Result<&mut Task> {
        self.tasks.get_mut(name).ok_or_else(|| {
            GraphError::UnknownTask {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Look up a task that may not exist
    pub fn find_task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// Declare that `task` runs after `predecessor`. Both tasks must exist.
    pub fn run_after(&mut self, task: &str, predecessor: &str) -> Result<()> {
        if !self.tasks.contains_key(predecessor) {
            return Err(GraphError::UnknownTask {
                name: predecessor.to_string(),
            }
            .into());
        }
        let task = self.task_mut(task)?;
        task.runs_after.insert(predecessor.to_string());
        Ok(())
    }

    /// Tasks in creation order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Number of tasks in the graph
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph has no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
