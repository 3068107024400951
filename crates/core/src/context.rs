//! Activation context
//!
//! A single context object carries everything the activation walk needs: the
//! feature registry, the mutable host task graph, and the property store. It
//! is created once per configuration run and passed by reference through the
//! whole walk; there are no ambient or process-global registries.
//!
//! The context also owns the one-time enabled-set validation (the
//! conflict/requirement pre-flight) and an [`ActivationTrace`] recording what
//! the walk did, for diagnostics.

use crate::errors::Result;
use crate::graph::TaskGraph;
use crate::properties::PropertyStore;
use crate::registry::FeatureRegistry;
use crate::resolve;

/// One entry of the activation trace
#[derive(Debug, Clone)]
pub struct TraceEntry {
    level: usize,
    message: String,
}

impl TraceEntry {
    /// Nesting depth; 0 for top-level entries
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Ordered record of what an activation walk did
#[derive(Debug, Default, Clone)]
pub struct ActivationTrace {
    entries: Vec<TraceEntry>,
}

impl ActivationTrace {
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn record(&mut self, level: usize, message: String) {
        self.entries.push(TraceEntry { level, message });
    }

    /// Render the trace as a tree
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.level == 0 {
                if index > 0 {
                    out.push('\n');
                }
                out.push_str(&entry.message);
                out.push('\n');
                continue;
            }
            let mut prefix = String::new();
            for _ in 0..entry.level - 1 {
                prefix.push_str("│  ");
            }
            let last_in_branch = index == self.entries.len() - 1
                || self.entries[index + 1].level < entry.level;
            prefix.push_str(if last_in_branch { "└─ " } else { "├─ " });
            out.push_str(&prefix);
            out.push_str(&entry.message);
            out.push('\n');
        }
        out
    }
}

/// Shared state of one activation run
pub struct ActivationContext<'a> {
    registry: &'a FeatureRegistry,
    graph: &'a mut TaskGraph,
    properties: &'a PropertyStore,
    trace: ActivationTrace,
    depth: usize,
    validated: bool,
}

impl<'a> ActivationContext<'a> {
    pub fn new(
        registry: &'a FeatureRegistry,
        graph: &'a mut TaskGraph,
        properties: &'a PropertyStore,
    ) -> Self {
        Self {
            registry,
            graph,
            properties,
            trace: ActivationTrace::default(),
            depth: 0,
            validated: false,
        }
    }

    /// The feature registry this run operates on
    ///
    /// Returns a reference with the registry's own lifetime, so features
    /// looked up here stay borrowable while the context is mutated.
    pub fn registry(&self) -> &'a FeatureRegistry {
        self.registry
    }

    /// The host task graph being configured
    pub fn graph(&self) -> &TaskGraph {
        self.graph
    }

    /// Mutable access to the host task graph
    pub fn graph_mut(&mut self) -> &mut TaskGraph {
        self.graph
    }

    /// The property store values are injected from
    pub fn properties(&self) -> &'a PropertyStore {
        self.properties
    }

    /// Validate the fully resolved enabled set, once per run
    ///
    /// Conflict and requirement violations abort before any activation side
    /// effect; a violation discovered mid-walk could leave tasks on the host
    /// graph with no way to retract them.
    pub fn ensure_validated(&mut self) -> Result<()> {
        if self.validated {
            return Ok(());
        }
        resolve::validate_enabled(self.registry)?;
        self.validated = true;
        Ok(())
    }

    /// Record a trace entry at the current depth and descend one level
    pub(crate) fn trace_enter(&mut self, message: String) {
        self.trace.record(self.depth, message);
        self.depth += 1;
    }

    /// Ascend one level
    pub(crate) fn trace_exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Record a trace entry at the current depth
    pub(crate) fn trace_record(&mut self, message: String) {
        self.trace.record(self.depth, message);
    }

    /// The trace recorded so far
    pub fn trace(&self) -> &ActivationTrace {
        &self.trace
    }

    /// Consume the context, keeping the trace for reporting
    pub fn into_trace(self) -> ActivationTrace {
        self.trace
    }
}
