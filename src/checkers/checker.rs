#![forbid(unsafe_code)]

//! Core Checker trait and helpers shared by checker implementations

use crate::config::CheckConfig;
use crate::error::{CheckerError, ValidationError};
use crate::model::IfcModel;
use crate::record::CheckRecord;
use crate::types::CheckStatus;

/// Trait that all pluggable checkers implement
///
/// A checker evaluates one compliance concern against the model and returns its
/// outcome as a list of records, closed by a `Summary` record. Checkers are
/// registered statically (builtin list or programmatic registration) or declared in
/// `checker_*.toml` files; the engine never loads code at run time.
///
/// A failing invocation returns `Err` with the failure message; the engine records
/// it against the checker and keeps running the rest, so one misbehaving checker
/// cannot abort a run.
pub trait Checker {
    /// Module identity this checker belongs to (must start with `checker_`)
    fn module(&self) -> &str;

    /// Name of this check (must start with `check_`)
    fn name(&self) -> &str;

    /// Human-readable description of the compliance concern
    fn description(&self) -> &str;

    /// Evaluates the checker against the model
    ///
    /// The configuration is the same mapping for every checker in a run; read the
    /// keys you understand and ignore the rest.
    fn check(&self, model: &IfcModel, config: &CheckConfig)
    -> Result<Vec<CheckRecord>, CheckerError>;
}

/// Summary record for a model containing no elements of the checked type
pub fn empty_model_summary(
    check_name: &str,
    required_value: &str,
    comment: &str,
) -> Result<CheckRecord, ValidationError> {
    CheckRecord::builder()
        .summary()
        .element_name(check_name)
        .check_status(CheckStatus::warning())
        .actual_value("0")
        .required_value(required_value)
        .comment(comment)
        .build()
}

/// Running tally of per-element outcomes, used to close a checker's record list
#[derive(Debug, Default, Clone, Copy)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub unspecified: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.unspecified
    }

    /// `pass` when nothing failed, `fail` otherwise
    pub fn summary_status(&self) -> CheckStatus {
        if self.failed == 0 {
            CheckStatus::pass()
        } else {
            CheckStatus::fail()
        }
    }

    /// Breakdown string used as the summary record's actual value
    pub fn breakdown(&self) -> String {
        format!(
            "Passed: {}, Failed: {}, Unspecified: {}",
            self.passed, self.failed, self.unspecified
        )
    }
}
