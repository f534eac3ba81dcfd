//! List command implementation
//!
//! This module implements the `ifcheck list` command, which discovers all checker
//! modules (builtin plus tools directory) and prints the module-to-checker mapping
//! without running anything.

use crate::cli::args::ListFormat;
use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, resolve_tools_dir};
use crate::engine::Orchestrator;
use crate::error::DiscoveryError;
use std::path::PathBuf;

/// Error type specific to the list command
#[derive(Debug, thiserror::Error)]
enum ListError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("Failed to serialize listing: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the list command
///
/// Exit code:
/// - 0: success
/// - 2: discovery error
pub fn run_list(tools_dir: Option<PathBuf>, format: ListFormat) -> i32 {
    match run_list_inner(tools_dir, format) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_list_inner(tools_dir: Option<PathBuf>, format: ListFormat) -> Result<(), ListError> {
    let mut orchestrator = match resolve_tools_dir(tools_dir) {
        Some(dir) => Orchestrator::with_tools_dir(dir),
        None => Orchestrator::new(),
    };
    let catalog = orchestrator.discover()?;

    match format {
        ListFormat::Human => {
            println!("Checker modules ({}):", catalog.len());
            println!();
            if let Some(registry) = orchestrator.registry() {
                for (module, checkers) in registry.modules() {
                    println!("{}", module);
                    for checker in checkers {
                        if checker.description().is_empty() {
                            println!("  {}", checker.name());
                        } else {
                            println!("  {} - {}", checker.name(), checker.description());
                        }
                    }
                    println!();
                }
            }
        }
        ListFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
    }

    Ok(())
}
