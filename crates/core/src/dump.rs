//! Diagnostic dump
//!
//! Renders a read-only report over the feature graph, the host task graph,
//! the property store, and the activation trace. Everything in the report
//! comes from explicit accessors and `describe()` visitors; the renderer
//! never inspects types at runtime.

use crate::context::ActivationTrace;
use crate::graph::TaskGraph;
use crate::plan::FeaturePlan;
use crate::properties::PropertyStore;

/// Render the full diagnostic report
pub fn render_report(
    plan: &FeaturePlan,
    graph: &TaskGraph,
    store: &PropertyStore,
    trace: Option<&ActivationTrace>,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("kiln version: {}\n", crate::version()));

    section(&mut out, "Features");
    for set in plan.sets() {
        out.push_str(&format!("{}:\n", set.id()));
        for (index, member) in set.members().iter().enumerate() {
            let Ok(feature) = plan.feature(member) else {
                continue;
            };
            let branch = if index == set.members().len() - 1 {
                "└─ "
            } else {
                "├─ "
            };
            let state = match (feature.is_enabled(), feature.is_active()) {
                (_, true) => "active",
                (true, false) => "enabled",
                (false, false) => "disabled",
            };
            out.push_str(&format!("{}{} [{}]\n", branch, member, state));
        }
    }

    if let Some(trace) = trace {
        if !trace.is_empty() {
            section(&mut out, "Trace");
            out.push_str(&trace.render());
        }
    }

    section(&mut out, "Applied plugins");
    for plugin in graph.plugins() {
        out.push_str(&format!("- {}\n", plugin));
    }

    section(&mut out, "Tasks");
    let mut names: Vec<&str> = graph.tasks().map(|t| t.name()).collect();
    names.sort_unstable();
    for name in names {
        let Ok(task) = graph.task(name) else { continue };
        out.push_str(&format!("- {} ({})\n", task.name(), task.description()));
        for (key, value) in task.describe() {
            out.push_str(&format!("    {} = {}\n", key, value));
        }
    }

    section(&mut out, "Properties");
    for (name, value) in store.describe() {
        out.push_str(&format!("{} = {}\n", name, value));
    }

    out
}

fn section(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    for _ in 0..title.len() {
        out.push('-');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> FeaturePlan {
        let mut builder = FeaturePlan::builder();
        builder.set("general");
        builder.feature("bootstrap", "general");
        builder.feature("git", "general");
        builder.build().unwrap()
    }

    #[test]
    fn test_report_lists_features_with_state() {
        let plan = plan();
        plan.feature("git").unwrap().enable().unwrap();

        let graph = TaskGraph::new();
        let store = PropertyStore::new();
        let report = render_report(&plan, &graph, &store, None);

        assert!(report.contains("general:"));
        assert!(report.contains("├─ bootstrap [disabled]"));
        assert!(report.contains("└─ git [enabled]"));
    }

    #[test]
    fn test_report_lists_tasks_sorted_with_settings() {
        let plan = plan();
        let mut graph = TaskGraph::new();
        graph.create_task("lint", "Runs the configured linters").unwrap();
        let task = graph.create_task("package", "Creates the archive").unwrap();
        task.set("compression", "zstd");
        graph.apply_plugin("container");

        let store = PropertyStore::new();
        let report = render_report(&plan, &graph, &store, None);

        assert!(report.contains("- container"));
        let lint_at = report.find("- lint (").unwrap();
        let package_at = report.find("- package (").unwrap();
        assert!(lint_at < package_at);
        assert!(report.contains("    compression = \"zstd\""));
    }

    #[test]
    fn test_report_includes_properties_and_version() {
        let plan = plan();
        let graph = TaskGraph::new();
        let mut store = PropertyStore::new();
        store.set("project", "name", "demo");

        let report = render_report(&plan, &graph, &store, None);
        assert!(report.starts_with("kiln version: "));
        assert!(report.contains("project.name = \"demo\""));
    }
}
