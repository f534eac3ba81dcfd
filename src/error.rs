//! Error types for ifcheck
//!
//! This module defines the error types used throughout ifcheck, following
//! a hierarchical structure with specific error variants for different
//! error categories.

use std::path::PathBuf;

/// Discovery-related errors
///
/// All variants are fatal to discovery: the registry is never left holding a
/// partially-loaded checker set.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Tools directory does not exist
    #[error("Tools directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Tools directory could not be enumerated
    #[error("Failed to read tools directory {dir}: {message}")]
    DirectoryRead { dir: PathBuf, message: String },

    /// A checker unit failed to load
    #[error("Failed to load {unit}: {message}")]
    LoadFailed { unit: String, message: String },

    /// A checker advertises a name outside the naming convention
    #[error("Invalid checker name '{name}' in {module}: names must start with \"check_\"")]
    InvalidCheckerName { module: String, name: String },

    /// A checker advertises a module identity outside the naming convention
    #[error("Invalid module identity '{module}': identities must start with \"checker_\"")]
    InvalidModuleName { module: String },

    /// Two checkers share the same (module, name) identity
    #[error("Duplicate checker '{module}::{name}'")]
    DuplicateChecker { module: String, name: String },
}

/// Record construction errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A required record field was never supplied to the builder
    #[error("Result record missing required field: {0}")]
    MissingField(&'static str),

    /// A status value failed validation
    #[error("Invalid check status: {0}")]
    InvalidStatus(String),
}

/// Failure of a single checker invocation
///
/// Errors of this type are absorbed by the execution engine: they become a failed
/// per-checker detail in the run report and never abort the run.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// The checker produced a record that failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The checker failed for its own reasons
    #[error("{0}")]
    Failed(String),
}

/// Model loading errors
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Model file does not exist
    #[error("Model file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error while reading the model file
    #[error("Failed to read model file {file}: {message}")]
    Io { file: PathBuf, message: String },

    /// Model file is not valid model JSON
    #[error("Failed to parse model file {file}: {message}")]
    Parse { file: PathBuf, message: String },
}

/// Top-level orchestrator errors
///
/// These are the only failures that escape to the caller of `run()`; everything a
/// checker does wrong is reported inside the run report instead.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// Discovery failed
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// `run()` was called before a successful `discover()`
    #[error("No checkers discovered. Call discover() first.")]
    NotDiscovered,

    /// The model handle does not satisfy the schema guard
    #[error("Unsupported model schema: {0}")]
    UnsupportedModel(String),
}
