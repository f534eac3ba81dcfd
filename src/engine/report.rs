#![forbid(unsafe_code)]

//! Run report data model
//!
//! A [`RunReport`] is the aggregate produced by one execution pass: the ordered
//! result records across all checkers, an execution summary with per-checker
//! details, and the trace log. Reports are created fresh per run and never mutated
//! afterwards.

use crate::record::ResultRecord;
use serde::Serialize;

/// Outcome of a single checker invocation
///
/// This is the typed contract behind failure isolation: a checker either succeeded
/// with some number of records or failed with a message, and either way the run
/// carries on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckerOutcome {
    Success { result_count: usize },
    Failed { error: String },
}

/// Per-checker entry in the run summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckerDetail {
    /// Qualified checker identity, `module::name`
    pub checker: String,
    #[serde(flatten)]
    pub outcome: CheckerOutcome,
}

impl CheckerDetail {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, CheckerOutcome::Success { .. })
    }
}

/// Execution statistics for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Checkers selected for this run (after filtering)
    pub total_checkers: usize,
    pub successful_checkers: usize,
    pub failed_checkers: usize,
    pub total_results: usize,
    pub checker_details: Vec<CheckerDetail>,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed_checkers == 0
    }
}

/// The aggregate produced by one execution
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// All records in deterministic order: module order, then checker order, then
    /// emission order
    pub results: Vec<ResultRecord>,
    pub summary: RunSummary,
    /// Trace lines recording each phase of discovery and execution
    pub log: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_detail_serialization() {
        let success = CheckerDetail {
            checker: "checker_doors::check_door_accessibility".to_string(),
            outcome: CheckerOutcome::Success { result_count: 3 },
        };
        let value = serde_json::to_value(&success).unwrap();
        assert_eq!(value["checker"], "checker_doors::check_door_accessibility");
        assert_eq!(value["status"], "success");
        assert_eq!(value["result_count"], 3);
        assert!(value.get("error").is_none());

        let failed = CheckerDetail {
            checker: "checker_walls::check_wall_fire_rating".to_string(),
            outcome: CheckerOutcome::Failed {
                error: "boom".to_string(),
            },
        };
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "boom");
        assert!(value.get("result_count").is_none());
    }

    #[test]
    fn test_detail_succeeded() {
        let detail = CheckerDetail {
            checker: "checker_doors::check_door_accessibility".to_string(),
            outcome: CheckerOutcome::Success { result_count: 0 },
        };
        assert!(detail.succeeded());

        let detail = CheckerDetail {
            checker: "checker_doors::check_door_accessibility".to_string(),
            outcome: CheckerOutcome::Failed {
                error: "boom".to_string(),
            },
        };
        assert!(!detail.succeeded());
    }

    #[test]
    fn test_summary_all_succeeded() {
        let summary = RunSummary {
            total_checkers: 2,
            successful_checkers: 2,
            failed_checkers: 0,
            total_results: 5,
            checker_details: vec![],
        };
        assert!(summary.all_succeeded());

        let summary = RunSummary {
            failed_checkers: 1,
            ..summary
        };
        assert!(!summary.all_succeeded());
    }
}
