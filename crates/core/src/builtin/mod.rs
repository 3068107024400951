//! Builtin feature catalog
//!
//! The standard features a project can toggle, their wiring into sets and
//! relations, and the presets that bundle common configurations. Individual
//! blueprints live in the submodules; this module owns the plan.

mod app;
mod general;

pub use app::{
    AppBootstrapBlueprint, ApplicationBlueprint, BenchmarkBlueprint, CodeAnalysisBlueprint,
    ContainerBlueprint, DevModeBlueprint, DocsBlueprint, LibBootstrapBlueprint, LibraryBlueprint,
    LintBlueprint, PackagingBlueprint, TestBlueprint,
};
pub use general::{BootstrapBlueprint, GitBlueprint, ProjectPropertiesBlueprint};

use crate::errors::Result;
use crate::plan::FeaturePlan;
use crate::presets::Preset;
use crate::properties::PropertyStore;

/// Build the standard feature plan
///
/// Two sets: `general` (project housekeeping) and `app` (everything tied to
/// what the project produces). All features default to disabled; enablement
/// comes from configuration or a preset.
pub fn standard_plan() -> Result<FeaturePlan> {
    let mut builder = FeaturePlan::builder();
    builder.set("general");
    builder.set("app");

    builder
        .feature("bootstrap", "general")
        .blueprint(BootstrapBlueprint::default());
    builder
        .feature("git", "general")
        .blueprint(GitBlueprint::default());
    builder
        .feature("project-properties", "general")
        .blueprint(ProjectPropertiesBlueprint::default());

    builder
        .feature("application", "app")
        .conflicts_with("library")
        .blueprint(ApplicationBlueprint::default());
    builder
        .feature("library", "app")
        .conflicts_with("application")
        .blueprint(LibraryBlueprint::default());
    builder
        .feature("app-bootstrap", "app")
        .requires("bootstrap")
        .requires("application")
        .blueprint(AppBootstrapBlueprint::default());
    builder
        .feature("lib-bootstrap", "app")
        .requires("bootstrap")
        .requires("library")
        .blueprint(LibBootstrapBlueprint::default());
    builder
        .feature("dev-mode", "app")
        .requires("application")
        .blueprint(DevModeBlueprint::default());
    builder
        .feature("test", "app")
        .blueprint(TestBlueprint::default());
    builder
        .feature("benchmark", "app")
        .blueprint(BenchmarkBlueprint::default());
    builder
        .feature("lint", "app")
        .activates_after("test")
        .activates_after("benchmark")
        .blueprint(LintBlueprint::default());
    builder
        .feature("code-analysis", "app")
        .activates_after("test")
        .activates_after("benchmark")
        .blueprint(CodeAnalysisBlueprint::default());
    builder
        .feature("packaging", "app")
        .activates_after("application")
        .blueprint(PackagingBlueprint::default());
    builder
        .feature("container", "app")
        .requires("application")
        .blueprint(ContainerBlueprint::default());
    builder
        .feature("docs", "app")
        .blueprint(DocsBlueprint::default());

    builder.build()
}

/// Preset for projects that produce a runnable application
pub fn app_preset() -> Preset {
    Preset::new("app")
        .enable("bootstrap")
        .enable("git")
        .enable("project-properties")
        .enable("application")
        .enable("app-bootstrap")
        .enable("dev-mode")
        .enable("test")
        .enable("benchmark")
        .enable("lint")
        .enable("code-analysis")
        .enable("packaging")
        .enable("container")
        .enable("docs")
}

/// Preset for projects that produce a reusable library
pub fn lib_preset() -> Preset {
    Preset::new("lib")
        .enable("bootstrap")
        .enable("git")
        .enable("project-properties")
        .enable("library")
        .enable("lib-bootstrap")
        .enable("test")
        .enable("lint")
        .enable("code-analysis")
        .enable("packaging")
        .enable("docs")
}

/// Look up a builtin preset by name
pub fn preset(id: &str) -> Option<Preset> {
    match id {
        "app" => Some(app_preset()),
        "lib" => Some(lib_preset()),
        _ => None,
    }
}

/// Property store seeded with project defaults
pub fn default_properties() -> PropertyStore {
    let mut store = PropertyStore::new();
    store.set("project", "name", "unnamed");
    store.set("project", "version", "0.1.0");
    store
}
