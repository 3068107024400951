//! `kiln plan` - validate and preview the activation order

use anyhow::Result;
use kiln_core::resolve;
use std::path::Path;

pub fn execute(manifest_path: &Path) -> Result<()> {
    let workspace = super::prepare(manifest_path)?;

    let set_ids: Vec<&str> = workspace.plan.sets().map(|s| s.id()).collect();
    let order = resolve::activation_order(&workspace.plan, &set_ids)?;

    if order.is_empty() {
        println!("No features enabled.");
        return Ok(());
    }

    println!("Activation order:");
    for (index, id) in order.iter().enumerate() {
        println!("{:>3}. {}", index + 1, id);
    }

    Ok(())
}
