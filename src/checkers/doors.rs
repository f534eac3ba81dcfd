#![forbid(unsafe_code)]

//! Door accessibility checker
//!
//! Verifies that doors meet accessibility standards: a minimum clear width of
//! 32 inches (0.8128 m) for ADA compliance, overridable through the `min_width`
//! configuration key.

use crate::checkers::{Checker, Tally, empty_model_summary};
use crate::config::CheckConfig;
use crate::error::{CheckerError, DiscoveryError};
use crate::model::IfcModel;
use crate::record::CheckRecord;
use crate::types::CheckStatus;
use regex::Regex;

const DEFAULT_MIN_WIDTH: f64 = 0.8128;
const CHECK_NAME: &str = "Door Accessibility Check";

pub struct DoorAccessibility {
    width_property: Regex,
}

impl DoorAccessibility {
    pub fn new() -> Result<Self, DiscoveryError> {
        let width_property = Regex::new("Width").map_err(|e| DiscoveryError::LoadFailed {
            unit: "checker_doors".to_string(),
            message: e.to_string(),
        })?;
        Ok(DoorAccessibility { width_property })
    }
}

impl Checker for DoorAccessibility {
    fn module(&self) -> &str {
        "checker_doors"
    }

    fn name(&self) -> &str {
        "check_door_accessibility"
    }

    fn description(&self) -> &str {
        "Doors meet the minimum accessible clear width"
    }

    fn check(
        &self,
        model: &IfcModel,
        config: &CheckConfig,
    ) -> Result<Vec<CheckRecord>, CheckerError> {
        let min_width = config.get_f64("min_width").unwrap_or(DEFAULT_MIN_WIDTH);

        let doors = model.by_type("IfcDoor");
        if doors.is_empty() {
            return Ok(vec![empty_model_summary(
                CHECK_NAME,
                ">= 1 door",
                "No doors found in model",
            )?]);
        }

        let mut results = Vec::new();
        let mut tally = Tally::default();

        for door in &doors {
            let width = door.real_property(&self.width_property);

            let (status, comment) = match width {
                Some(width) if width >= min_width => {
                    tally.passed += 1;
                    (
                        CheckStatus::pass(),
                        format!(
                            "Door width {:.3}m meets accessibility standard (>= {:.3}m)",
                            width, min_width
                        ),
                    )
                }
                Some(width) => {
                    tally.failed += 1;
                    (
                        CheckStatus::fail(),
                        format!(
                            "Door width {:.3}m does NOT meet accessibility standard (>= {:.3}m)",
                            width, min_width
                        ),
                    )
                }
                None => {
                    tally.unspecified += 1;
                    (
                        CheckStatus::log(),
                        "Door width not specified in model".to_string(),
                    )
                }
            };

            let mut builder = CheckRecord::builder()
                .element_id(door.global_id.clone())
                .element_type(door.ifc_type.clone())
                .element_name(door.display_name())
                .check_status(status)
                .actual_value(match width {
                    Some(width) => format!("{:.3}m", width),
                    None => "Not specified".to_string(),
                })
                .required_value(format!(
                    ">= {:.3}m ({:.0} inches)",
                    min_width,
                    min_width * 39.37
                ))
                .comment(comment);
            if let Some(long_name) = &door.long_name {
                builder = builder.element_name_long(long_name.clone());
            }
            results.push(builder.build()?);
        }

        let comment = if tally.failed > 0 {
            format!(
                "Checked {} door(s). {} door(s) failed accessibility check.",
                doors.len(),
                tally.failed
            )
        } else {
            format!("All {} door(s) pass accessibility check.", doors.len())
        };

        results.push(
            CheckRecord::builder()
                .summary()
                .element_name(CHECK_NAME)
                .check_status(tally.summary_status())
                .actual_value(tally.breakdown())
                .required_value(format!("All doors >= {:.4}m wide", min_width))
                .comment(comment)
                .build()?,
        );

        Ok(results)
    }
}
