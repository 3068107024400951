//! Command line interface definition and dispatch

use crate::commands;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log format options
#[derive(Debug, Clone, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

/// Feature-oriented build configurator
#[derive(Debug, Parser)]
#[command(name = "kiln", version, about = "Feature-oriented build configurator")]
pub struct Cli {
    /// Path to the project manifest
    #[arg(long, global = true, default_value = "kiln.toml")]
    pub manifest: PathBuf,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// kiln subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List features with their set, enabled state, and relations
    Features,
    /// Validate the enabled set and show the activation order
    Plan,
    /// Run the full activation and summarize the configured task graph
    Activate,
    /// Print the full diagnostic report
    Dump,
}

impl Cli {
    /// Initialize logging and run the selected subcommand
    pub fn dispatch(self) -> Result<()> {
        let format = self.log_format.as_ref().map(|f| match f {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        });
        kiln_core::logging::init(format)?;

        match self.command {
            Commands::Features => commands::features::execute(&self.manifest),
            Commands::Plan => commands::plan::execute(&self.manifest),
            Commands::Activate => commands::activate::execute(&self.manifest),
            Commands::Dump => commands::dump::execute(&self.manifest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["kiln", "plan"]).unwrap();
        assert!(matches!(cli.command, Commands::Plan));
        assert_eq!(cli.manifest, PathBuf::from("kiln.toml"));
    }

    #[test]
    fn test_cli_accepts_global_flags() {
        let cli =
            Cli::try_parse_from(["kiln", "dump", "--manifest", "other.toml", "--log-format", "json"])
                .unwrap();
        assert!(matches!(cli.command, Commands::Dump));
        assert_eq!(cli.manifest, PathBuf::from("other.toml"));
        assert!(matches!(cli.log_format, Some(LogFormat::Json)));
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["kiln", "frobnicate"]).is_err());
    }
}
