//! `kiln features` - list the feature catalog

use anyhow::Result;
use std::path::Path;

pub fn execute(manifest_path: &Path) -> Result<()> {
    let workspace = super::prepare(manifest_path)?;

    for set in workspace.plan.sets() {
        println!("{}:", set.id());
        for member in set.members() {
            let feature = workspace.plan.feature(member)?;
            let state = if feature.is_enabled() {
                "enabled"
            } else {
                "disabled"
            };
            let mut line = format!("  {} [{}]", member, state);
            if !feature.requires().is_empty() {
                line.push_str(&format!(" requires: {}", feature.requires().join(", ")));
            }
            if !feature.conflicts_with().is_empty() {
                line.push_str(&format!(
                    " conflicts: {}",
                    feature.conflicts_with().join(", ")
                ));
            }
            if !feature.activates_after().is_empty() {
                line.push_str(&format!(
                    " after: {}",
                    feature.activates_after().join(", ")
                ));
            }
            println!("{}", line);
        }
    }

    Ok(())
}
