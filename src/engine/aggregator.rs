#![forbid(unsafe_code)]

//! Result aggregation and querying
//!
//! Pure functions over the result set of a run. The status vocabulary is open, so
//! aggregation buckets on whatever status values actually occur instead of a fixed
//! set.

use crate::record::ResultRecord;
use std::collections::BTreeMap;

/// Count results per distinct `check_status` value
///
/// Empty input yields an empty mapping.
pub fn summary_by_status(results: &[ResultRecord]) -> BTreeMap<String, usize> {
    let mut summary = BTreeMap::new();
    for result in results {
        *summary
            .entry(result.record.check_status.as_str().to_string())
            .or_insert(0) += 1;
    }
    summary
}

/// Filter results by status and/or element type
///
/// Criteria combine conjunctively: supplying both requires both to match.
/// Supplying neither returns every record. The input is never mutated.
pub fn filter_results<'a>(
    results: &'a [ResultRecord],
    status: Option<&str>,
    element_type: Option<&str>,
) -> Vec<&'a ResultRecord> {
    results
        .iter()
        .filter(|result| {
            status.is_none_or(|status| result.record.check_status.as_str() == status)
        })
        .filter(|result| {
            element_type.is_none_or(|element_type| result.record.element_type == element_type)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CheckRecord, ResultRecord};
    use crate::types::CheckStatus;

    fn record(element_type: &str, status: CheckStatus) -> ResultRecord {
        let record = CheckRecord::builder()
            .element_id("id")
            .element_type(element_type)
            .element_name("element")
            .check_status(status)
            .actual_value("actual")
            .required_value("required")
            .build()
            .unwrap();
        ResultRecord::tag(record, "checker_test", "check_test")
    }

    fn sample_results() -> Vec<ResultRecord> {
        vec![
            record("IfcDoor", CheckStatus::pass()),
            record("IfcDoor", CheckStatus::fail()),
            record("IfcWall", CheckStatus::fail()),
            record("IfcWindow", CheckStatus::warning()),
            record("Summary", CheckStatus::fail()),
        ]
    }

    #[test]
    fn test_summary_by_status() {
        let results = sample_results();
        let summary = summary_by_status(&results);

        assert_eq!(summary.len(), 3);
        assert_eq!(summary["pass"], 1);
        assert_eq!(summary["fail"], 3);
        assert_eq!(summary["warning"], 1);
    }

    #[test]
    fn test_summary_by_status_empty() {
        assert!(summary_by_status(&[]).is_empty());
    }

    #[test]
    fn test_summary_counts_custom_statuses() {
        let results = vec![
            record("IfcDoor", CheckStatus::new("needs-review").unwrap()),
            record("IfcDoor", CheckStatus::new("needs-review").unwrap()),
        ];
        let summary = summary_by_status(&results);
        assert_eq!(summary["needs-review"], 2);
    }

    #[test]
    fn test_filter_by_status() {
        let results = sample_results();
        let failed = filter_results(&results, Some("fail"), None);

        assert_eq!(failed.len(), 3);
        assert!(failed.iter().all(|r| r.record.check_status.is_fail()));
        // consistency with the status summary
        assert_eq!(failed.len(), summary_by_status(&results)["fail"]);
    }

    #[test]
    fn test_filter_by_element_type() {
        let results = sample_results();
        let doors = filter_results(&results, None, Some("IfcDoor"));

        assert_eq!(doors.len(), 2);
        assert!(doors.iter().all(|r| r.record.element_type == "IfcDoor"));

        let summaries = filter_results(&results, None, Some("Summary"));
        assert_eq!(summaries.len(), 1);
    }

    #[test]
    fn test_filter_by_both_criteria_is_conjunctive() {
        let results = sample_results();
        let filtered = filter_results(&results, Some("fail"), Some("IfcDoor"));

        assert_eq!(filtered.len(), 1);
        assert!(filtered[0].record.check_status.is_fail());
        assert_eq!(filtered[0].record.element_type, "IfcDoor");
    }

    #[test]
    fn test_filter_without_criteria_returns_everything() {
        let results = sample_results();
        let filtered = filter_results(&results, None, None);
        assert_eq!(filtered.len(), results.len());
    }

    #[test]
    fn test_filter_unknown_status_returns_nothing() {
        let results = sample_results();
        assert!(filter_results(&results, Some("unknown"), None).is_empty());
    }
}
