#![forbid(unsafe_code)]

//! JSON output formatter for machine-readable reports

use crate::engine::RunReport;

/// Formats a full run report as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates a new JsonFormatter
    pub fn new() -> Self {
        JsonFormatter
    }

    /// Serialize the report: results, summary and trace log
    pub fn format(&self, report: &RunReport) -> serde_json::Result<String> {
        serde_json::to_string_pretty(report)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CheckerDetail, CheckerOutcome, RunSummary};
    use crate::record::{CheckRecord, ResultRecord};
    use crate::types::CheckStatus;

    fn sample_report() -> RunReport {
        let record = CheckRecord::builder()
            .element_id("d1")
            .element_type("IfcDoor")
            .element_name("Door 1")
            .check_status(CheckStatus::fail())
            .actual_value("0.700m")
            .required_value(">= 0.813m")
            .comment("too narrow")
            .build()
            .unwrap();

        RunReport {
            results: vec![ResultRecord::tag(
                record,
                "checker_doors",
                "check_door_accessibility",
            )],
            summary: RunSummary {
                total_checkers: 1,
                successful_checkers: 1,
                failed_checkers: 0,
                total_results: 1,
                checker_details: vec![CheckerDetail {
                    checker: "checker_doors::check_door_accessibility".to_string(),
                    outcome: CheckerOutcome::Success { result_count: 1 },
                }],
            },
            log: vec!["Running: checker_doors::check_door_accessibility".to_string()],
        }
    }

    #[test]
    fn test_format_structure() {
        let formatter = JsonFormatter::new();
        let json = formatter.format(&sample_report()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["results"].is_array());
        assert!(value["summary"].is_object());
        assert!(value["log"].is_array());

        let result = &value["results"][0];
        assert_eq!(result["_checker_file"], "checker_doors");
        assert_eq!(result["check_status"], "fail");
        assert_eq!(value["summary"]["total_checkers"], 1);
        assert_eq!(value["summary"]["checker_details"][0]["status"], "success");
    }

    #[test]
    fn test_nullable_fields_serialized_as_null() {
        let formatter = JsonFormatter::new();
        let json = formatter.format(&sample_report()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let result = value["results"][0].as_object().unwrap();
        assert!(result.contains_key("element_name_long"));
        assert!(result["element_name_long"].is_null());
        assert!(result.contains_key("log"));
        assert!(result["log"].is_null());
    }
}
