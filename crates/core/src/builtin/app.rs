//! Blueprints tied to what the project produces

use crate::blueprint::Blueprint;
use crate::context::ActivationContext;
use crate::errors::{ActivationError, Result};

/// Runnable application support
#[derive(Debug, Default)]
pub struct ApplicationBlueprint {
    entry: Option<String>,
}

impl Blueprint for ApplicationBlueprint {
    fn name(&self) -> &str {
        "application"
    }

    fn apply_plugins(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut().apply_plugin("application");
        Ok(())
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("run", "Runs the application")?;
        Ok(())
    }

    fn inject_dependencies(&mut self, cx: &mut ActivationContext) -> Result<()> {
        self.entry = Some(cx.properties().str_or("application", "entry", "src/main"));
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        if let Some(entry) = &self.entry {
            cx.graph_mut().task_mut("run")?.set("entry", entry.as_str());
        }
        Ok(())
    }
}

/// Reusable library support
#[derive(Debug, Default)]
pub struct LibraryBlueprint;

impl Blueprint for LibraryBlueprint {
    fn name(&self) -> &str {
        "library"
    }

    fn apply_plugins(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut().apply_plugin("library");
        Ok(())
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("install", "Installs the artifact into the local repository")?;
        Ok(())
    }
}

/// Application skeleton generation
#[derive(Debug, Default)]
pub struct AppBootstrapBlueprint {
    entry: Option<String>,
}

impl Blueprint for AppBootstrapBlueprint {
    fn name(&self) -> &str {
        "app-bootstrap"
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("bootstrap-app", "Creates an application entry point skeleton")?;
        Ok(())
    }

    fn inject_dependencies(&mut self, cx: &mut ActivationContext) -> Result<()> {
        self.entry = Some(cx.properties().str_or("application", "entry", "src/main"));
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        if let Some(entry) = &self.entry {
            cx.graph_mut()
                .task_mut("bootstrap-app")?
                .set("entry", entry.as_str());
        }
        if cx.graph().find_task("bootstrap").is_some() {
            cx.graph_mut().run_after("bootstrap-app", "bootstrap")?;
        }
        Ok(())
    }
}

/// Library skeleton generation
#[derive(Debug, Default)]
pub struct LibBootstrapBlueprint;

impl Blueprint for LibBootstrapBlueprint {
    fn name(&self) -> &str {
        "lib-bootstrap"
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("bootstrap-lib", "Creates a library skeleton")?;
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        if cx.graph().find_task("bootstrap").is_some() {
            cx.graph_mut().run_after("bootstrap-lib", "bootstrap")?;
        }
        Ok(())
    }
}

/// Run-and-reload development loop
#[derive(Debug, Default)]
pub struct DevModeBlueprint {
    entry: Option<String>,
}

impl Blueprint for DevModeBlueprint {
    fn name(&self) -> &str {
        "dev-mode"
    }

    fn check_preconditions(&self, cx: &ActivationContext) -> Result<()> {
        if !cx.registry().get("application")?.is_enabled() {
            return Err(ActivationError::Precondition {
                feature: "dev-mode".to_string(),
                message: "'dev-mode' requires the 'application' feature".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut().create_task(
            "dev",
            "Runs the application and restarts it when sources change",
        )?;
        Ok(())
    }

    fn inject_dependencies(&mut self, cx: &mut ActivationContext) -> Result<()> {
        self.entry = Some(cx.properties().str_or("application", "entry", "src/main"));
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let task = cx.graph_mut().task_mut("dev")?;
        if let Some(entry) = &self.entry {
            task.set("entry", entry.as_str());
        }
        task.set("watch", true);
        Ok(())
    }
}

/// Test suite execution
#[derive(Debug, Default)]
pub struct TestBlueprint {
    pretty_print: bool,
}

impl Blueprint for TestBlueprint {
    fn name(&self) -> &str {
        "test"
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("test", "Runs the test suite")?;
        Ok(())
    }

    fn inject_dependencies(&mut self, cx: &mut ActivationContext) -> Result<()> {
        self.pretty_print = cx.properties().bool_or("test", "pretty-print", false);
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .task_mut("test")?
            .set("pretty-print", self.pretty_print);
        Ok(())
    }
}

/// Benchmark execution
#[derive(Debug, Default)]
pub struct BenchmarkBlueprint;

impl Blueprint for BenchmarkBlueprint {
    fn name(&self) -> &str {
        "benchmark"
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("benchmark", "Runs all benchmarks")?;
        Ok(())
    }
}

/// Source linting
#[derive(Debug, Default)]
pub struct LintBlueprint;

impl Blueprint for LintBlueprint {
    fn name(&self) -> &str {
        "lint"
    }

    fn apply_plugins(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut().apply_plugin("lint");
        Ok(())
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("lint", "Runs the configured linters")?;
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        // Tasks of ordering predecessors exist by now, when those features
        // are enabled.
        for predecessor in ["test", "benchmark"] {
            if cx.graph().find_task(predecessor).is_some() {
                cx.graph_mut().run_after("lint", predecessor)?;
            }
        }
        Ok(())
    }
}

/// Static code analysis
#[derive(Debug, Default)]
pub struct CodeAnalysisBlueprint;

impl Blueprint for CodeAnalysisBlueprint {
    fn name(&self) -> &str {
        "code-analysis"
    }

    fn apply_plugins(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut().apply_plugin("code-analysis");
        Ok(())
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("analyze", "Runs static code analysis")?;
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        for predecessor in ["test", "benchmark"] {
            if cx.graph().find_task(predecessor).is_some() {
                cx.graph_mut().run_after("analyze", predecessor)?;
            }
        }
        Ok(())
    }
}

/// Distributable archive creation
#[derive(Debug, Default)]
pub struct PackagingBlueprint {
    archive: Option<String>,
    compression: Option<String>,
}

impl Blueprint for PackagingBlueprint {
    fn name(&self) -> &str {
        "packaging"
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("package", "Creates the distributable archive")?;
        Ok(())
    }

    fn inject_dependencies(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let properties = cx.properties();
        let name = properties.str_or("project", "name", "unnamed");
        let version = properties.str_or("project", "version", "0.1.0");
        self.archive = Some(format!("{}-{}.tar", name, version));
        self.compression = Some(properties.str_or("packaging", "compression", "zstd"));
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let task = cx.graph_mut().task_mut("package")?;
        if let Some(archive) = &self.archive {
            task.set("archive", archive.as_str());
        }
        if let Some(compression) = &self.compression {
            task.set("compression", compression.as_str());
        }
        Ok(())
    }
}

/// Container image build and publish
#[derive(Debug, Default)]
pub struct ContainerBlueprint {
    base_image: Option<String>,
    tag: Option<String>,
}

impl Blueprint for ContainerBlueprint {
    fn name(&self) -> &str {
        "container"
    }

    fn apply_plugins(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut().apply_plugin("container");
        Ok(())
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let graph = cx.graph_mut();
        graph.create_task("build-image", "Builds the container image")?;
        graph.create_task("push-image", "Pushes the container image")?;
        graph.run_after("push-image", "build-image")?;
        Ok(())
    }

    fn inject_dependencies(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let properties = cx.properties();
        self.base_image = Some(properties.str_or(
            "container",
            "base-image",
            "docker.io/library/debian:stable-slim",
        ));
        self.tag = Some(properties.str_or("container", "tag", "latest"));
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let task = cx.graph_mut().task_mut("build-image")?;
        if let Some(base_image) = &self.base_image {
            task.set("base-image", base_image.as_str());
        }
        if let Some(tag) = &self.tag {
            task.set("tag", tag.as_str());
        }
        Ok(())
    }
}

/// Documentation generation
#[derive(Debug, Default)]
pub struct DocsBlueprint;

impl Blueprint for DocsBlueprint {
    fn name(&self) -> &str {
        "docs"
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("docs", "Generates the project documentation")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::standard_plan;
    use crate::errors::KilnError;
    use crate::graph::TaskGraph;
    use crate::properties::PropertyStore;
    use serde_json::json;

    #[test]
    fn test_dev_mode_precondition_names_the_condition() {
        let plan = standard_plan().unwrap();
        let mut graph = TaskGraph::new();
        let store = PropertyStore::new();
        let cx = ActivationContext::new(plan.registry(), &mut graph, &store);

        let blueprint = DevModeBlueprint::default();
        let err = blueprint.check_preconditions(&cx).unwrap_err();
        match err {
            KilnError::Activation(ActivationError::Precondition { feature, message }) => {
                assert_eq!(feature, "dev-mode");
                assert!(message.contains("application"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dev_mode_precondition_passes_when_application_enabled() {
        let plan = standard_plan().unwrap();
        plan.feature("application").unwrap().enable().unwrap();

        let mut graph = TaskGraph::new();
        let store = PropertyStore::new();
        let cx = ActivationContext::new(plan.registry(), &mut graph, &store);

        let blueprint = DevModeBlueprint::default();
        assert!(blueprint.check_preconditions(&cx).is_ok());
    }

    #[test]
    fn test_container_orders_push_after_build() {
        let plan = standard_plan().unwrap();
        let mut graph = TaskGraph::new();
        let store = PropertyStore::new();
        let mut cx = ActivationContext::new(plan.registry(), &mut graph, &store);

        let mut blueprint = ContainerBlueprint::default();
        blueprint.apply_plugins(&mut cx).unwrap();
        blueprint.create_tasks(&mut cx).unwrap();
        blueprint.inject_dependencies(&mut cx).unwrap();
        blueprint.configure(&mut cx).unwrap();

        assert!(graph.has_plugin("container"));
        let after: Vec<&str> = graph.task("push-image").unwrap().runs_after().collect();
        assert_eq!(after, vec!["build-image"]);
        assert_eq!(
            graph.task("build-image").unwrap().get("tag"),
            Some(&json!("latest"))
        );
    }

    #[test]
    fn test_packaging_derives_archive_name() {
        let plan = standard_plan().unwrap();
        let mut graph = TaskGraph::new();
        let mut store = PropertyStore::new();
        store.set("project", "name", "demo");
        store.set("project", "version", "2.0.0");
        let mut cx = ActivationContext::new(plan.registry(), &mut graph, &store);

        let mut blueprint = PackagingBlueprint::default();
        blueprint.create_tasks(&mut cx).unwrap();
        blueprint.inject_dependencies(&mut cx).unwrap();
        blueprint.configure(&mut cx).unwrap();

        assert_eq!(
            graph.task("package").unwrap().get("archive"),
            Some(&json!("demo-2.0.0.tar"))
        );
    }

    #[test]
    fn test_lint_orders_after_present_predecessor_tasks() {
        let plan = standard_plan().unwrap();
        let mut graph = TaskGraph::new();
        let store = PropertyStore::new();
        let mut cx = ActivationContext::new(plan.registry(), &mut graph, &store);

        // Only "test" exists; "benchmark" was never created.
        cx.graph_mut().create_task("test", "Runs the test suite").unwrap();

        let mut blueprint = LintBlueprint::default();
        blueprint.create_tasks(&mut cx).unwrap();
        blueprint.configure(&mut cx).unwrap();

        let after: Vec<&str> = graph.task("lint").unwrap().runs_after().collect();
        assert_eq!(after, vec!["test"]);
    }
}
