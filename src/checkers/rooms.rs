#![forbid(unsafe_code)]

//! Room ceiling height checker
//!
//! Verifies that rooms (IfcSpace) meet the minimum ceiling height of 2.4 m,
//! overridable through the `min_height` configuration key.

use crate::checkers::{Checker, Tally, empty_model_summary};
use crate::config::CheckConfig;
use crate::error::{CheckerError, DiscoveryError};
use crate::model::IfcModel;
use crate::record::CheckRecord;
use crate::types::CheckStatus;
use regex::Regex;

const DEFAULT_MIN_HEIGHT: f64 = 2.4;
const CHECK_NAME: &str = "Room Height Check";

pub struct RoomHeights {
    height_property: Regex,
}

impl RoomHeights {
    pub fn new() -> Result<Self, DiscoveryError> {
        let height_property = Regex::new("Height|Ceiling").map_err(|e| {
            DiscoveryError::LoadFailed {
                unit: "checker_rooms".to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(RoomHeights { height_property })
    }
}

impl Checker for RoomHeights {
    fn module(&self) -> &str {
        "checker_rooms"
    }

    fn name(&self) -> &str {
        "check_room_heights"
    }

    fn description(&self) -> &str {
        "Rooms meet the minimum ceiling height requirement"
    }

    fn check(
        &self,
        model: &IfcModel,
        config: &CheckConfig,
    ) -> Result<Vec<CheckRecord>, CheckerError> {
        let min_height = config.get_f64("min_height").unwrap_or(DEFAULT_MIN_HEIGHT);

        let spaces = model.by_type("IfcSpace");
        if spaces.is_empty() {
            return Ok(vec![empty_model_summary(
                CHECK_NAME,
                ">= 1 room/space",
                "No spaces/rooms found in model",
            )?]);
        }

        let mut results = Vec::new();
        let mut tally = Tally::default();

        for space in &spaces {
            let height = space.real_property(&self.height_property);

            let (status, comment) = match height {
                Some(height) if height >= min_height => {
                    tally.passed += 1;
                    (
                        CheckStatus::pass(),
                        format!(
                            "Room height {:.2}m meets minimum standard (>= {:.2}m)",
                            height, min_height
                        ),
                    )
                }
                Some(height) => {
                    tally.failed += 1;
                    (
                        CheckStatus::fail(),
                        format!(
                            "Room height {:.2}m BELOW minimum standard (>= {:.2}m)",
                            height, min_height
                        ),
                    )
                }
                None => {
                    tally.unspecified += 1;
                    (
                        CheckStatus::log(),
                        "Room height not specified in model".to_string(),
                    )
                }
            };

            let mut builder = CheckRecord::builder()
                .element_id(space.global_id.clone())
                .element_type(space.ifc_type.clone())
                .element_name(space.display_name())
                .check_status(status)
                .actual_value(match height {
                    Some(height) => format!("{:.2}m", height),
                    None => "Not specified".to_string(),
                })
                .required_value(format!(">= {:.2}m", min_height))
                .comment(comment);
            if let Some(long_name) = &space.long_name {
                builder = builder.element_name_long(long_name.clone());
            }
            results.push(builder.build()?);
        }

        let comment = if tally.failed > 0 {
            format!(
                "Checked {} room(s). {} below minimum height.",
                spaces.len(),
                tally.failed
            )
        } else {
            format!("All {} room(s) meet height requirement.", spaces.len())
        };

        results.push(
            CheckRecord::builder()
                .summary()
                .element_name(CHECK_NAME)
                .check_status(tally.summary_status())
                .actual_value(tally.breakdown())
                .required_value(format!("All rooms >= {:.2}m height", min_height))
                .comment(comment)
                .build()?,
        );

        Ok(results)
    }
}
