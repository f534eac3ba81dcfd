#![forbid(unsafe_code)]

//! Stair dimensions checker
//!
//! Verifies that stairs meet building code requirements: tread depth at least
//! 0.28 m and riser height at most 0.19 m, overridable through the `min_tread`
//! and `max_riser` configuration keys. A stair is only judged when both
//! dimensions are present; partial data is logged.

use crate::checkers::{Checker, Tally, empty_model_summary};
use crate::config::CheckConfig;
use crate::error::{CheckerError, DiscoveryError};
use crate::model::IfcModel;
use crate::record::CheckRecord;
use crate::types::CheckStatus;
use regex::Regex;

const DEFAULT_MIN_TREAD: f64 = 0.28;
const DEFAULT_MAX_RISER: f64 = 0.19;
const CHECK_NAME: &str = "Stair Dimensions Check";

pub struct StairDimensions {
    tread_property: Regex,
    riser_property: Regex,
}

impl StairDimensions {
    pub fn new() -> Result<Self, DiscoveryError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| DiscoveryError::LoadFailed {
                unit: "checker_stairs".to_string(),
                message: e.to_string(),
            })
        };
        Ok(StairDimensions {
            tread_property: compile("(?i)tread")?,
            riser_property: compile("(?i)riser")?,
        })
    }
}

impl Checker for StairDimensions {
    fn module(&self) -> &str {
        "checker_stairs"
    }

    fn name(&self) -> &str {
        "check_stair_dimensions"
    }

    fn description(&self) -> &str {
        "Stairs meet code requirements for tread depth and riser height"
    }

    fn check(
        &self,
        model: &IfcModel,
        config: &CheckConfig,
    ) -> Result<Vec<CheckRecord>, CheckerError> {
        let min_tread = config.get_f64("min_tread").unwrap_or(DEFAULT_MIN_TREAD);
        let max_riser = config.get_f64("max_riser").unwrap_or(DEFAULT_MAX_RISER);

        let stairs = model.by_type("IfcStair");
        if stairs.is_empty() {
            return Ok(vec![empty_model_summary(
                CHECK_NAME,
                ">= 1 stair",
                "No stairs found in model",
            )?]);
        }

        let mut results = Vec::new();
        let mut tally = Tally::default();

        for stair in &stairs {
            let tread_depth = stair.real_property(&self.tread_property);
            let riser_height = stair.real_property(&self.riser_property);

            let (status, comment) = match (tread_depth, riser_height) {
                (Some(tread), Some(riser)) => {
                    let tread_ok = tread >= min_tread;
                    let riser_ok = riser <= max_riser;
                    if tread_ok && riser_ok {
                        tally.passed += 1;
                        (
                            CheckStatus::pass(),
                            format!(
                                "Stair dimensions meet code: tread={:.3}m, riser={:.3}m",
                                tread, riser
                            ),
                        )
                    } else {
                        tally.failed += 1;
                        let mut issues = Vec::new();
                        if !tread_ok {
                            issues.push(format!(
                                "tread too shallow ({:.3}m < {:.3}m)",
                                tread, min_tread
                            ));
                        }
                        if !riser_ok {
                            issues.push(format!(
                                "riser too tall ({:.3}m > {:.3}m)",
                                riser, max_riser
                            ));
                        }
                        (
                            CheckStatus::fail(),
                            format!("Stair dimensions FAIL code: {}", issues.join(", ")),
                        )
                    }
                }
                (tread, riser) => {
                    tally.unspecified += 1;
                    let mut specified = Vec::new();
                    if let Some(tread) = tread {
                        specified.push(format!("tread={:.3}m", tread));
                    }
                    if let Some(riser) = riser {
                        specified.push(format!("riser={:.3}m", riser));
                    }
                    let detail = if specified.is_empty() {
                        "No dimensions".to_string()
                    } else {
                        specified.join(", ")
                    };
                    (
                        CheckStatus::log(),
                        format!("Stair dimensions partially specified: {}", detail),
                    )
                }
            };

            let mut actual = Vec::new();
            if let Some(tread) = tread_depth {
                actual.push(format!("T:{:.3}m", tread));
            }
            if let Some(riser) = riser_height {
                actual.push(format!("R:{:.3}m", riser));
            }
            let actual_value = if actual.is_empty() {
                "Not specified".to_string()
            } else {
                actual.join(", ")
            };

            let mut builder = CheckRecord::builder()
                .element_id(stair.global_id.clone())
                .element_type(stair.ifc_type.clone())
                .element_name(stair.display_name())
                .check_status(status)
                .actual_value(actual_value)
                .required_value(format!(
                    "Tread >= {:.3}m, Riser <= {:.3}m",
                    min_tread, max_riser
                ))
                .comment(comment);
            if let Some(long_name) = &stair.long_name {
                builder = builder.element_name_long(long_name.clone());
            }
            results.push(builder.build()?);
        }

        let comment = if tally.failed > 0 {
            format!(
                "Checked {} stair(s). {} failed dimension check.",
                stairs.len(),
                tally.failed
            )
        } else {
            format!("All {} stair(s) meet code dimensions.", stairs.len())
        };

        results.push(
            CheckRecord::builder()
                .summary()
                .element_name(CHECK_NAME)
                .check_status(tally.summary_status())
                .actual_value(tally.breakdown())
                .required_value("All stairs meet code dimensions")
                .comment(comment)
                .build()?,
        );

        Ok(results)
    }
}
