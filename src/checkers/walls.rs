#![forbid(unsafe_code)]

//! Wall fire rating checker
//!
//! Verifies that walls carry a fire resistance classification (e.g. F60, F90,
//! F120) matching the required rating, overridable through the `required_rating`
//! configuration key. Ratings are read from property sets whose name mentions
//! fire protection.

use crate::checkers::{Checker, Tally, empty_model_summary};
use crate::config::CheckConfig;
use crate::error::{CheckerError, DiscoveryError};
use crate::model::IfcModel;
use crate::record::CheckRecord;
use crate::types::CheckStatus;
use regex::Regex;

const DEFAULT_REQUIRED_RATING: &str = "F60";
const CHECK_NAME: &str = "Wall Fire Rating Check";

pub struct WallFireRating {
    fire_set: Regex,
    rating_property: Regex,
}

impl WallFireRating {
    pub fn new() -> Result<Self, DiscoveryError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| DiscoveryError::LoadFailed {
                unit: "checker_walls".to_string(),
                message: e.to_string(),
            })
        };
        Ok(WallFireRating {
            fire_set: compile("Fire")?,
            rating_property: compile("Rating|Class")?,
        })
    }
}

impl Checker for WallFireRating {
    fn module(&self) -> &str {
        "checker_walls"
    }

    fn name(&self) -> &str {
        "check_wall_fire_rating"
    }

    fn description(&self) -> &str {
        "Walls carry the required fire resistance classification"
    }

    fn check(
        &self,
        model: &IfcModel,
        config: &CheckConfig,
    ) -> Result<Vec<CheckRecord>, CheckerError> {
        let required_rating = config
            .get_str("required_rating")
            .unwrap_or(DEFAULT_REQUIRED_RATING);

        let walls = model.by_type("IfcWall");
        if walls.is_empty() {
            return Ok(vec![empty_model_summary(
                CHECK_NAME,
                ">= 1 wall",
                "No walls found in model",
            )?]);
        }

        let mut results = Vec::new();
        let mut tally = Tally::default();

        for wall in &walls {
            let rating = wall
                .find_property_in_set(&self.fire_set, &self.rating_property)
                .and_then(|prop| prop.value.as_text());

            let (status, comment) = match rating {
                Some(rating)
                    if rating == required_rating || rating.contains(required_rating) =>
                {
                    tally.passed += 1;
                    (
                        CheckStatus::pass(),
                        format!("Wall has required fire rating: {}", rating),
                    )
                }
                Some(rating) => {
                    tally.failed += 1;
                    (
                        CheckStatus::fail(),
                        format!(
                            "Wall fire rating {} does NOT meet requirement of {}",
                            rating, required_rating
                        ),
                    )
                }
                None => {
                    tally.unspecified += 1;
                    (
                        CheckStatus::warning(),
                        "Fire rating not specified in model".to_string(),
                    )
                }
            };

            let mut builder = CheckRecord::builder()
                .element_id(wall.global_id.clone())
                .element_type(wall.ifc_type.clone())
                .element_name(wall.display_name())
                .check_status(status)
                .actual_value(rating.unwrap_or("Not specified"))
                .required_value(required_rating)
                .comment(comment);
            if let Some(long_name) = &wall.long_name {
                builder = builder.element_name_long(long_name.clone());
            }
            results.push(builder.build()?);
        }

        // Unrated walls degrade the summary to a warning even when nothing failed.
        let summary_status = if tally.failed == 0 && tally.unspecified == 0 {
            CheckStatus::pass()
        } else if tally.failed == 0 {
            CheckStatus::warning()
        } else {
            CheckStatus::fail()
        };

        let comment = if tally.failed > 0 || tally.unspecified > 0 {
            format!(
                "Checked {} wall(s). {} failed, {} unspecified.",
                walls.len(),
                tally.failed,
                tally.unspecified
            )
        } else {
            format!("All {} wall(s) have fire rating specified.", walls.len())
        };

        results.push(
            CheckRecord::builder()
                .summary()
                .element_name(CHECK_NAME)
                .check_status(summary_status)
                .actual_value(tally.breakdown())
                .required_value(format!("All walls rated {}", required_rating))
                .comment(comment)
                .build()?,
        );

        Ok(results)
    }
}
