//! `kiln dump` - full diagnostic report
//!
//! Runs the activation cascade, then renders the state of the feature graph,
//! the configured tasks, the properties, and the activation trace.

use anyhow::Result;
use kiln_core::context::ActivationContext;
use kiln_core::dump::render_report;
use kiln_core::graph::TaskGraph;
use std::path::Path;

pub fn execute(manifest_path: &Path) -> Result<()> {
    let workspace = super::prepare(manifest_path)?;

    let mut graph = TaskGraph::new();
    let mut cx = ActivationContext::new(workspace.plan.registry(), &mut graph, &workspace.store);
    for set in workspace.plan.sets() {
        set.activate(&mut cx)?;
    }
    let trace = cx.into_trace();

    print!(
        "{}",
        render_report(&workspace.plan, &graph, &workspace.store, Some(&trace))
    );

    Ok(())
}
