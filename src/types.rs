#![forbid(unsafe_code)]

//! Core domain types for ifcheck
//!
//! This module defines the fundamental types used throughout the ifcheck system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name prefix identifying a checker module (e.g. `checker_doors`)
pub const MODULE_PREFIX: &str = "checker_";

/// Name prefix identifying a check function within a module (e.g. `check_door_accessibility`)
pub const CHECK_PREFIX: &str = "check_";

/// Reserved template unit excluded from discovery
pub const TEMPLATE_FILE: &str = "checker_template.toml";

/// The pseudo element type used for per-checker summary records
pub const SUMMARY_ELEMENT_TYPE: &str = "Summary";

/// The status of one check outcome
///
/// The vocabulary is open: `pass`, `fail`, `warning` and `log` are the values the
/// builtin checkers emit, but third-party checkers may introduce their own. The only
/// invariant is that a status is a non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CheckStatus(String);

impl CheckStatus {
    /// Creates a new CheckStatus, validating the input
    ///
    /// Returns None if the input is empty.
    pub fn new(status: impl Into<String>) -> Option<Self> {
        let status = status.into();
        if status.is_empty() {
            return None;
        }
        Some(CheckStatus(status))
    }

    /// The element satisfied the check
    pub fn pass() -> Self {
        CheckStatus("pass".to_string())
    }

    /// The element violated the check
    pub fn fail() -> Self {
        CheckStatus("fail".to_string())
    }

    /// The check completed but the outcome needs attention
    pub fn warning() -> Self {
        CheckStatus("warning".to_string())
    }

    /// Informational outcome, e.g. data missing from the model
    pub fn log() -> Self {
        CheckStatus("log".to_string())
    }

    /// Returns the status as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_fail(&self) -> bool {
        self.0 == "fail"
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CheckStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CheckStatus::new(value).ok_or_else(|| "check status must be non-empty".to_string())
    }
}

impl From<CheckStatus> for String {
    fn from(status: CheckStatus) -> Self {
        status.0
    }
}
