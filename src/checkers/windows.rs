#![forbid(unsafe_code)]

//! Window thermal performance checker
//!
//! Verifies that windows meet thermal transmittance standards: the U-value must
//! stay at or below a maximum of 2.0 W/(m2K), overridable through the
//! `max_u_value` configuration key.

use crate::checkers::{Checker, Tally, empty_model_summary};
use crate::config::CheckConfig;
use crate::error::{CheckerError, DiscoveryError};
use crate::model::IfcModel;
use crate::record::CheckRecord;
use crate::types::CheckStatus;
use regex::Regex;

const DEFAULT_MAX_U_VALUE: f64 = 2.0;
const CHECK_NAME: &str = "Window Thermal Check";

pub struct WindowThermal {
    u_value_property: Regex,
}

impl WindowThermal {
    pub fn new() -> Result<Self, DiscoveryError> {
        let u_value_property = Regex::new("U-value|Uvalue|ThermalTransmittance").map_err(|e| {
            DiscoveryError::LoadFailed {
                unit: "checker_windows".to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(WindowThermal { u_value_property })
    }
}

impl Checker for WindowThermal {
    fn module(&self) -> &str {
        "checker_windows"
    }

    fn name(&self) -> &str {
        "check_window_thermal"
    }

    fn description(&self) -> &str {
        "Windows meet the maximum thermal transmittance standard"
    }

    fn check(
        &self,
        model: &IfcModel,
        config: &CheckConfig,
    ) -> Result<Vec<CheckRecord>, CheckerError> {
        let max_u_value = config.get_f64("max_u_value").unwrap_or(DEFAULT_MAX_U_VALUE);

        let windows = model.by_type("IfcWindow");
        if windows.is_empty() {
            return Ok(vec![empty_model_summary(
                CHECK_NAME,
                ">= 1 window",
                "No windows found in model",
            )?]);
        }

        let mut results = Vec::new();
        let mut tally = Tally::default();

        for window in &windows {
            let u_value = window.real_property(&self.u_value_property);

            let (status, comment) = match u_value {
                Some(u_value) if u_value <= max_u_value => {
                    tally.passed += 1;
                    (
                        CheckStatus::pass(),
                        format!(
                            "Window U-value {:.2} W/(m2K) meets thermal standard (<= {:.2})",
                            u_value, max_u_value
                        ),
                    )
                }
                Some(u_value) => {
                    tally.failed += 1;
                    (
                        CheckStatus::fail(),
                        format!(
                            "Window U-value {:.2} W/(m2K) EXCEEDS thermal standard (<= {:.2})",
                            u_value, max_u_value
                        ),
                    )
                }
                None => {
                    tally.unspecified += 1;
                    (
                        CheckStatus::log(),
                        "Window U-value not specified in model".to_string(),
                    )
                }
            };

            let mut builder = CheckRecord::builder()
                .element_id(window.global_id.clone())
                .element_type(window.ifc_type.clone())
                .element_name(window.display_name())
                .check_status(status)
                .actual_value(match u_value {
                    Some(u_value) => format!("{:.2} W/(m2K)", u_value),
                    None => "Not specified".to_string(),
                })
                .required_value(format!("<= {:.2} W/(m2K)", max_u_value))
                .comment(comment);
            if let Some(long_name) = &window.long_name {
                builder = builder.element_name_long(long_name.clone());
            }
            results.push(builder.build()?);
        }

        let comment = if tally.failed > 0 {
            format!(
                "Checked {} window(s). {} failed thermal check.",
                windows.len(),
                tally.failed
            )
        } else {
            format!("All {} window(s) meet thermal standard.", windows.len())
        };

        results.push(
            CheckRecord::builder()
                .summary()
                .element_name(CHECK_NAME)
                .check_status(tally.summary_status())
                .actual_value(tally.breakdown())
                .required_value(format!("All windows U-value <= {:.2} W/(m2K)", max_u_value))
                .comment(comment)
                .build()?,
        );

        Ok(results)
    }
}
