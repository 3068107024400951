//! `kiln activate` - run the full activation cascade

use anyhow::Result;
use kiln_core::context::ActivationContext;
use kiln_core::graph::TaskGraph;
use std::path::Path;
use tracing::info;

pub fn execute(manifest_path: &Path) -> Result<()> {
    let workspace = super::prepare(manifest_path)?;

    let mut graph = TaskGraph::new();
    let mut cx = ActivationContext::new(workspace.plan.registry(), &mut graph, &workspace.store);
    for set in workspace.plan.sets() {
        set.activate(&mut cx)?;
    }

    let activated: Vec<&str> = workspace
        .plan
        .registry()
        .all()
        .filter(|f| f.is_active())
        .map(|f| f.id())
        .collect();
    info!("Activated {} features", activated.len());

    if activated.is_empty() {
        println!("No features enabled; nothing was activated.");
        return Ok(());
    }

    println!("Activated features: {}", activated.join(", "));
    println!();
    println!("Configured {} tasks:", graph.len());
    for task in graph.tasks() {
        println!("  {} ({})", task.name(), task.description());
    }

    Ok(())
}
