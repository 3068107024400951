use anyhow::Result;
use clap::Parser;
use kiln_core::errors::{ActivationError, KilnError, PlanError};

mod cli;
mod commands;
mod manifest;

fn main() -> Result<()> {
    let parsed = cli::Cli::parse();

    match parsed.dispatch() {
        Ok(()) => Ok(()),
        Err(err) => {
            // Configuration errors get a dedicated exit code so build
            // wrappers can distinguish a bad feature graph from tool failure.
            if let Some(kiln_error) = err.downcast_ref::<KilnError>() {
                if is_configuration_error(kiln_error) {
                    eprintln!("Error: {}", kiln_error);
                    std::process::exit(2);
                }
            }
            Err(err)
        }
    }
}

fn is_configuration_error(err: &KilnError) -> bool {
    matches!(
        err,
        KilnError::Activation(ActivationError::Conflict { .. })
            | KilnError::Activation(ActivationError::MissingRequirement { .. })
            | KilnError::Plan(PlanError::DependencyCycle { .. })
    )
}
