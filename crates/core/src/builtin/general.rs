//! Project housekeeping blueprints

use crate::blueprint::Blueprint;
use crate::context::ActivationContext;
use crate::errors::Result;
use serde_json::Value;

/// Creates the initial project layout
#[derive(Debug, Default)]
pub struct BootstrapBlueprint {
    layout: Option<String>,
}

impl Blueprint for BootstrapBlueprint {
    fn name(&self) -> &str {
        "bootstrap"
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("bootstrap", "Creates the initial project layout")?;
        Ok(())
    }

    fn inject_dependencies(&mut self, cx: &mut ActivationContext) -> Result<()> {
        self.layout = Some(cx.properties().str_or("bootstrap", "layout", "standard"));
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        if let Some(layout) = &self.layout {
            cx.graph_mut()
                .task_mut("bootstrap")?
                .set("layout", layout.as_str());
        }
        Ok(())
    }
}

/// Sets up version control support
#[derive(Debug, Default)]
pub struct GitBlueprint {
    ignore_entries: Vec<String>,
}

impl Blueprint for GitBlueprint {
    fn name(&self) -> &str {
        "git"
    }

    fn apply_plugins(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut().apply_plugin("git");
        Ok(())
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("generate-gitignore", "Generates the .gitignore file")?;
        Ok(())
    }

    fn inject_dependencies(&mut self, cx: &mut ActivationContext) -> Result<()> {
        self.ignore_entries = cx
            .properties()
            .get("git", "ignore")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|| vec![".kiln/".to_string(), "build/".to_string()]);
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .task_mut("generate-gitignore")?
            .set("entries", self.ignore_entries.clone());
        Ok(())
    }
}

/// Exposes project coordinates to the build
#[derive(Debug, Default)]
pub struct ProjectPropertiesBlueprint {
    name: Option<String>,
    version: Option<String>,
}

impl Blueprint for ProjectPropertiesBlueprint {
    fn name(&self) -> &str {
        "project-properties"
    }

    fn create_tasks(&mut self, cx: &mut ActivationContext) -> Result<()> {
        cx.graph_mut()
            .create_task("project-info", "Prints the project coordinates")?;
        Ok(())
    }

    fn inject_dependencies(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let properties = cx.properties();
        self.name = Some(properties.str_or("project", "name", "unnamed"));
        self.version = Some(properties.str_or("project", "version", "0.1.0"));
        Ok(())
    }

    fn configure(&mut self, cx: &mut ActivationContext) -> Result<()> {
        let task = cx.graph_mut().task_mut("project-info")?;
        if let Some(name) = &self.name {
            task.set("name", name.as_str());
        }
        if let Some(version) = &self.version {
            task.set("version", version.as_str());
        }
        Ok(())
    }
}
