//! End-to-end tests over the builtin feature catalog
//!
//! Applies presets to the standard plan, runs the full cascade, and checks
//! the resulting host task graph.

use kiln_core::builtin;
use kiln_core::context::ActivationContext;
use kiln_core::dump;
use kiln_core::errors::{ActivationError, KilnError};
use kiln_core::graph::TaskGraph;
use kiln_core::properties::PropertyStore;
use kiln_core::resolve;

#[test]
fn test_app_preset_configures_the_full_graph() {
    let plan = builtin::standard_plan().unwrap();
    let mut store = builtin::default_properties();
    store.set("project", "name", "demo");
    store.set("project", "version", "1.2.3");
    builtin::app_preset().apply(&plan, &mut store).unwrap();

    let mut graph = TaskGraph::new();
    let mut cx = ActivationContext::new(plan.registry(), &mut graph, &store);
    plan.set("general").unwrap().activate(&mut cx).unwrap();
    plan.set("app").unwrap().activate(&mut cx).unwrap();

    for task in [
        "bootstrap",
        "generate-gitignore",
        "project-info",
        "run",
        "bootstrap-app",
        "dev",
        "test",
        "benchmark",
        "lint",
        "analyze",
        "package",
        "build-image",
        "push-image",
        "docs",
    ] {
        assert!(graph.find_task(task).is_some(), "task '{}' missing", task);
    }

    // Conflicting sibling stayed out.
    assert!(plan.feature("library").unwrap().is_inactive());
    assert!(graph.find_task("install").is_none());

    // Cross-feature ordering wired during configure.
    let lint_after: Vec<&str> = graph.task("lint").unwrap().runs_after().collect();
    assert!(lint_after.contains(&"test"));
    assert!(lint_after.contains(&"benchmark"));

    // Injected values reached the tasks.
    assert_eq!(
        graph.task("package").unwrap().get("archive"),
        Some(&serde_json::json!("demo-1.2.3.tar"))
    );
    assert_eq!(
        graph.task("dev").unwrap().get("watch"),
        Some(&serde_json::json!(true))
    );

    assert!(graph.has_plugin("git"));
    assert!(graph.has_plugin("application"));
    assert!(graph.has_plugin("container"));
}

#[test]
fn test_lib_preset_avoids_application_tasks() {
    let plan = builtin::standard_plan().unwrap();
    let mut store = builtin::default_properties();
    builtin::lib_preset().apply(&plan, &mut store).unwrap();

    let mut graph = TaskGraph::new();
    let mut cx = ActivationContext::new(plan.registry(), &mut graph, &store);
    plan.set("general").unwrap().activate(&mut cx).unwrap();
    plan.set("app").unwrap().activate(&mut cx).unwrap();

    assert!(graph.find_task("install").is_some());
    assert!(graph.find_task("bootstrap-lib").is_some());
    assert!(graph.find_task("run").is_none());
    assert!(graph.find_task("dev").is_none());
}

#[test]
fn test_application_and_library_conflict() {
    let plan = builtin::standard_plan().unwrap();
    plan.feature("application").unwrap().enable().unwrap();
    plan.feature("library").unwrap().enable().unwrap();

    let store = PropertyStore::new();
    let mut graph = TaskGraph::new();
    let mut cx = ActivationContext::new(plan.registry(), &mut graph, &store);
    let err = plan.set("app").unwrap().activate(&mut cx).unwrap_err();

    assert!(matches!(
        err,
        KilnError::Activation(ActivationError::Conflict { .. })
    ));
    assert!(graph.is_empty());
}

#[test]
fn test_container_alone_misses_its_requirement() {
    let plan = builtin::standard_plan().unwrap();
    plan.feature("container").unwrap().enable().unwrap();

    let err = resolve::validate_enabled(plan.registry()).unwrap_err();
    match err {
        KilnError::Activation(ActivationError::MissingRequirement { feature, requires }) => {
            assert_eq!(feature, "container");
            assert_eq!(requires, "application");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_activation_order_preview_matches_cascade() {
    let plan = builtin::standard_plan().unwrap();
    let mut store = builtin::default_properties();
    builtin::app_preset().apply(&plan, &mut store).unwrap();

    let order = resolve::activation_order(&plan, &["general", "app"]).unwrap();

    // Ordering predecessors come strictly before their successors.
    let index_of = |id: &str| {
        order
            .iter()
            .position(|o| o == id)
            .unwrap_or_else(|| panic!("'{}' not in order {:?}", id, order))
    };
    assert!(index_of("test") < index_of("lint"));
    assert!(index_of("benchmark") < index_of("lint"));
    assert!(index_of("test") < index_of("code-analysis"));
    assert!(index_of("application") < index_of("packaging"));

    // The preview is pure: nothing activated.
    assert!(plan.registry().all().all(|f| f.is_inactive()));
}

#[test]
fn test_dump_reports_activated_state() {
    let plan = builtin::standard_plan().unwrap();
    let mut store = builtin::default_properties();
    builtin::app_preset().apply(&plan, &mut store).unwrap();

    let mut graph = TaskGraph::new();
    let mut cx = ActivationContext::new(plan.registry(), &mut graph, &store);
    plan.set("general").unwrap().activate(&mut cx).unwrap();
    plan.set("app").unwrap().activate(&mut cx).unwrap();
    let trace = cx.into_trace();

    let report = dump::render_report(&plan, &graph, &store, Some(&trace));
    assert!(report.contains("Features"));
    assert!(report.contains("git [active]"));
    assert!(report.contains("library [disabled]"));
    assert!(report.contains("activate set 'app'"));
    assert!(report.contains("- run (Runs the application)"));
    assert!(report.contains("project.name"));
}
