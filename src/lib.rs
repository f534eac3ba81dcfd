#![forbid(unsafe_code)]

//! ifcheck: compliance check orchestration for IFC building models
//!
//! ifcheck evaluates a set of independently authored compliance checkers against a
//! building model and aggregates the outcome into a single run report. Checkers
//! plug in through the [`checkers::Checker`] trait (builtin set or programmatic
//! registration) or as declarative `checker_*.toml` threshold files; one
//! misbehaving checker is reported as failed without aborting the run.

pub mod checkers;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;
pub mod record;
pub mod types;

// Re-export error types for convenient access
pub use error::{
    CheckerError, DiscoveryError, ModelError, OrchestratorError, ValidationError,
};

// Re-export core domain types for convenient access
pub use config::CheckConfig;
pub use engine::{Orchestrator, RunReport, run_all_checks};
pub use model::IfcModel;
pub use record::{CheckRecord, ResultRecord};
pub use types::CheckStatus;
