//! Check command implementation
//!
//! This module implements the `ifcheck check` command, which:
//! - Loads a building model from its JSON file
//! - Discovers checkers (builtin set plus the tools directory)
//! - Runs all selected checkers against the model
//! - Renders the run report (summary, detailed or JSON)
//! - Returns an appropriate exit code

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, color_choice, resolve_tools_dir};
use crate::config::CheckConfig;
use crate::engine::Orchestrator;
use crate::error::{ModelError, OrchestratorError};
use crate::model::IfcModel;
use crate::output::{HumanFormatter, JsonFormatter};
use std::path::{Path, PathBuf};

/// Error type specific to the check command
#[derive(Debug, thiserror::Error)]
pub(crate) enum CheckError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    #[error("{0}")]
    Params(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the check command
///
/// Exit code:
/// - 0: run completed (individual check failures are reported, not fatal)
/// - 2: top-level error (missing file, discovery failure, unsupported model)
pub fn run_check(
    model_path: &Path,
    tools_dir: Option<PathBuf>,
    filter: Option<&str>,
    params: &[String],
    output: OutputFormat,
    verbose: bool,
    color: ColorChoice,
) -> i32 {
    match run_check_inner(model_path, tools_dir, filter, params, output, verbose, color) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_check_inner(
    model_path: &Path,
    tools_dir: Option<PathBuf>,
    filter: Option<&str>,
    params: &[String],
    output: OutputFormat,
    verbose: bool,
    color: ColorChoice,
) -> Result<(), CheckError> {
    let config = CheckConfig::from_pairs(params).map_err(CheckError::Params)?;

    let model = load_model(model_path, output)?;

    let mut orchestrator = match resolve_tools_dir(tools_dir) {
        Some(dir) => Orchestrator::with_tools_dir(dir),
        None => Orchestrator::new(),
    };
    orchestrator.discover().map_err(OrchestratorError::from)?;

    if output != OutputFormat::Json {
        println!("Running compliance checks...");
        println!();
    }

    let report = orchestrator.run(&model, filter, &config)?;

    if verbose && output != OutputFormat::Json {
        for line in &report.log {
            println!("{}", line);
        }
        println!();
    }

    match output {
        OutputFormat::Summary => {
            HumanFormatter::new(color_choice(color)).print_summary(&report)?;
        }
        OutputFormat::Detailed => {
            HumanFormatter::new(color_choice(color)).print_detailed(&report)?;
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new().format(&report)?);
        }
    }

    Ok(())
}

/// Load the model and print basic information about it
fn load_model(path: &Path, output: OutputFormat) -> Result<IfcModel, CheckError> {
    let model = IfcModel::from_file(path)?;

    if output != OutputFormat::Json {
        println!("Loading IFC model: {}", path.display());
        if let Some(project) = model.project() {
            println!("  Project: {}", project);
        }
        println!("  Schema: {}", model.schema());
        println!("  Total entities: {}", model.len());
        println!();
    }

    Ok(model)
}
