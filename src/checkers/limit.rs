#![forbid(unsafe_code)]

//! Declarative threshold checkers loaded from TOML
//!
//! A `checker_*.toml` file in the tools directory declares one or more checks that
//! compare a numeric entity property against a limit. The file contributes a module
//! whose identity is the file stem; its checks plug into the registry exactly like
//! builtin checkers, without any dynamically loaded code.
//!
//! ```toml
//! [[check]]
//! name = "check_corridor_width"
//! description = "Corridors must be at least 1.2 m wide"
//! element_type = "IfcSpace"
//! property = "(?i)width"
//! min = 1.2
//! unit = "m"
//! config_key = "corridor_min_width"
//! ```

use crate::checkers::{Checker, Tally, empty_model_summary};
use crate::config::CheckConfig;
use crate::error::{CheckerError, DiscoveryError};
use crate::model::IfcModel;
use crate::record::CheckRecord;
use crate::types::CheckStatus;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// TOML structure for a checker file
#[derive(Debug, Deserialize)]
struct CheckerFileDefinition {
    #[serde(default, rename = "check")]
    checks: Vec<CheckDefinition>,
}

#[derive(Debug, Deserialize)]
struct CheckDefinition {
    name: String,
    #[serde(default)]
    description: String,
    element_type: String,
    property: String,
    #[serde(default)]
    property_set: Option<String>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    config_key: Option<String>,
}

/// A checker comparing a numeric property against declared limits
pub struct LimitChecker {
    module: String,
    name: String,
    description: String,
    element_type: String,
    property: Regex,
    property_set: Option<Regex>,
    min: Option<f64>,
    max: Option<f64>,
    unit: String,
    config_key: Option<String>,
}

impl std::fmt::Debug for LimitChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LimitChecker")
            .field("module", &self.module)
            .field("name", &self.name)
            .field("element_type", &self.element_type)
            .field("property", &self.property.as_str())
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}

impl LimitChecker {
    /// Parse every check declared in a TOML checker file
    ///
    /// The module identity is the file stem (`checker_clearances.toml` contributes
    /// module `checker_clearances`).
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::LoadFailed` if the file cannot be read, the TOML is
    /// invalid, a regex does not compile, a check declares no limit, or a
    /// `config_key` is combined with both limits.
    pub fn from_path(path: &Path) -> Result<Vec<Self>, DiscoveryError> {
        let unit = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let module = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| unit.clone());

        let content = std::fs::read_to_string(path).map_err(|e| DiscoveryError::LoadFailed {
            unit: unit.clone(),
            message: e.to_string(),
        })?;

        Self::from_toml(&module, &content).map_err(|e| match e {
            DiscoveryError::LoadFailed { message, .. } => {
                DiscoveryError::LoadFailed { unit: unit.clone(), message }
            }
            other => other,
        })
    }

    /// Parse checks from TOML content under the given module identity
    pub fn from_toml(module: &str, content: &str) -> Result<Vec<Self>, DiscoveryError> {
        let load_failed = |message: String| DiscoveryError::LoadFailed {
            unit: module.to_string(),
            message,
        };

        let def: CheckerFileDefinition =
            toml::from_str(content).map_err(|e| load_failed(format!("Failed to parse TOML: {}", e)))?;

        let mut checkers = Vec::new();
        for check in def.checks {
            let property = Regex::new(&check.property).map_err(|e| {
                load_failed(format!(
                    "Failed to compile property pattern '{}': {}",
                    check.property, e
                ))
            })?;

            let property_set = match &check.property_set {
                Some(pattern) => Some(Regex::new(pattern).map_err(|e| {
                    load_failed(format!(
                        "Failed to compile property_set pattern '{}': {}",
                        pattern, e
                    ))
                })?),
                None => None,
            };

            if check.min.is_none() && check.max.is_none() {
                return Err(load_failed(format!(
                    "Check '{}' declares neither min nor max",
                    check.name
                )));
            }
            if check.config_key.is_some() && check.min.is_some() && check.max.is_some() {
                return Err(load_failed(format!(
                    "Check '{}': config_key requires exactly one of min/max",
                    check.name
                )));
            }

            checkers.push(LimitChecker {
                module: module.to_string(),
                name: check.name,
                description: check.description,
                element_type: check.element_type,
                property,
                property_set,
                min: check.min,
                max: check.max,
                unit: check.unit.unwrap_or_default(),
                config_key: check.config_key,
            });
        }

        Ok(checkers)
    }

    /// Limits for this run, applying a configured override when present
    fn limits(&self, config: &CheckConfig) -> Result<(Option<f64>, Option<f64>), CheckerError> {
        let (mut min, mut max) = (self.min, self.max);
        if let Some(key) = &self.config_key
            && let Some(value) = config.get(key)
        {
            let value = value.as_f64().ok_or_else(|| {
                CheckerError::Failed(format!("Configuration key '{}' is not numeric", key))
            })?;
            if min.is_some() {
                min = Some(value);
            } else {
                max = Some(value);
            }
        }
        Ok((min, max))
    }

    fn required_value(&self, min: Option<f64>, max: Option<f64>) -> String {
        match (min, max) {
            (Some(min), Some(max)) => {
                format!("{:.3}{unit} .. {:.3}{unit}", min, max, unit = self.unit)
            }
            (Some(min), None) => format!(">= {:.3}{}", min, self.unit),
            (None, Some(max)) => format!("<= {:.3}{}", max, self.unit),
            (None, None) => String::new(),
        }
    }
}

impl Checker for LimitChecker {
    fn module(&self) -> &str {
        &self.module
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(
        &self,
        model: &IfcModel,
        config: &CheckConfig,
    ) -> Result<Vec<CheckRecord>, CheckerError> {
        let (min, max) = self.limits(config)?;
        let required = self.required_value(min, max);

        let entities = model.by_type(&self.element_type);
        if entities.is_empty() {
            return Ok(vec![empty_model_summary(
                &self.name,
                &format!(">= 1 {}", self.element_type),
                &format!("No {} found in model", self.element_type),
            )?]);
        }

        let mut results = Vec::new();
        let mut tally = Tally::default();

        for entity in &entities {
            let value = match &self.property_set {
                Some(set) => entity
                    .find_property_in_set(set, &self.property)
                    .and_then(|p| p.value.as_f64()),
                None => entity.real_property(&self.property),
            };

            let (status, comment) = match value {
                Some(value) => {
                    let below = min.is_some_and(|limit| value < limit);
                    let above = max.is_some_and(|limit| value > limit);
                    if below {
                        tally.failed += 1;
                        (
                            CheckStatus::fail(),
                            format!(
                                "Value {:.3}{unit} below required minimum {:.3}{unit}",
                                value,
                                min.unwrap_or_default(),
                                unit = self.unit
                            ),
                        )
                    } else if above {
                        tally.failed += 1;
                        (
                            CheckStatus::fail(),
                            format!(
                                "Value {:.3}{unit} above allowed maximum {:.3}{unit}",
                                value,
                                max.unwrap_or_default(),
                                unit = self.unit
                            ),
                        )
                    } else {
                        tally.passed += 1;
                        (
                            CheckStatus::pass(),
                            format!("Value {:.3}{} within limits", value, self.unit),
                        )
                    }
                }
                None => {
                    tally.unspecified += 1;
                    (
                        CheckStatus::log(),
                        format!("Property matching '{}' not specified", self.property.as_str()),
                    )
                }
            };

            let mut builder = CheckRecord::builder()
                .element_id(entity.global_id.clone())
                .element_type(entity.ifc_type.clone())
                .element_name(entity.display_name())
                .check_status(status)
                .actual_value(match value {
                    Some(v) => format!("{:.3}{}", v, self.unit),
                    None => "Not specified".to_string(),
                })
                .required_value(required.clone())
                .comment(comment);
            if let Some(long_name) = &entity.long_name {
                builder = builder.element_name_long(long_name.clone());
            }
            results.push(builder.build()?);
        }

        results.push(
            CheckRecord::builder()
                .summary()
                .element_name(&self.name)
                .check_status(tally.summary_status())
                .actual_value(tally.breakdown())
                .required_value(format!(
                    "All {} values {}",
                    self.element_type, required
                ))
                .comment(format!(
                    "Checked {} element(s). {} failed.",
                    entities.len(),
                    tally.failed
                ))
                .build()?,
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Property, PropertySet, PropertyValue};

    const CLEARANCE_TOML: &str = r#"
[[check]]
name = "check_corridor_width"
description = "Corridors must be wide enough"
element_type = "IfcSpace"
property = "(?i)width"
min = 1.2
unit = "m"
config_key = "corridor_min_width"
"#;

    fn space(global_id: &str, width: Option<f64>) -> Entity {
        let mut property_sets = Vec::new();
        if let Some(width) = width {
            property_sets.push(PropertySet {
                name: "Pset_SpaceCommon".to_string(),
                properties: vec![Property {
                    name: "NominalWidth".to_string(),
                    value: PropertyValue::Real(width),
                }],
            });
        }
        Entity {
            global_id: global_id.to_string(),
            ifc_type: "IfcSpace".to_string(),
            name: Some(format!("Space {}", global_id)),
            long_name: None,
            property_sets,
        }
    }

    #[test]
    fn test_from_toml() {
        let checkers = LimitChecker::from_toml("checker_clearances", CLEARANCE_TOML).unwrap();
        assert_eq!(checkers.len(), 1);
        assert_eq!(checkers[0].module(), "checker_clearances");
        assert_eq!(checkers[0].name(), "check_corridor_width");
    }

    #[test]
    fn test_from_toml_rejects_bad_regex() {
        let toml = r#"
[[check]]
name = "check_bad"
element_type = "IfcSpace"
property = "(unclosed"
min = 1.0
"#;
        let result = LimitChecker::from_toml("checker_bad", toml);
        assert!(matches!(result, Err(DiscoveryError::LoadFailed { .. })));
    }

    #[test]
    fn test_from_toml_requires_a_limit() {
        let toml = r#"
[[check]]
name = "check_nothing"
element_type = "IfcSpace"
property = "Width"
"#;
        let result = LimitChecker::from_toml("checker_bad", toml);
        assert!(matches!(result, Err(DiscoveryError::LoadFailed { .. })));
    }

    #[test]
    fn test_min_limit_outcomes() {
        let checkers = LimitChecker::from_toml("checker_clearances", CLEARANCE_TOML).unwrap();
        let checker = &checkers[0];

        let mut model = IfcModel::new("IFC4");
        model.add_entity(space("s1", Some(1.5)));
        model.add_entity(space("s2", Some(0.9)));
        model.add_entity(space("s3", None));

        let records = checker.check(&model, &CheckConfig::new()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].check_status, CheckStatus::pass());
        assert_eq!(records[1].check_status, CheckStatus::fail());
        assert!(records[1].comment.as_deref().unwrap().contains("below"));
        assert_eq!(records[2].check_status, CheckStatus::log());
        assert_eq!(records[2].actual_value, "Not specified");

        let summary = &records[3];
        assert!(summary.is_summary());
        assert_eq!(summary.check_status, CheckStatus::fail());
        assert_eq!(summary.actual_value, "Passed: 1, Failed: 1, Unspecified: 1");
    }

    #[test]
    fn test_config_override() {
        let checkers = LimitChecker::from_toml("checker_clearances", CLEARANCE_TOML).unwrap();
        let checker = &checkers[0];

        let mut model = IfcModel::new("IFC4");
        model.add_entity(space("s1", Some(1.5)));

        let mut config = CheckConfig::new();
        config.set("corridor_min_width", 2.0);

        let records = checker.check(&model, &config).unwrap();
        assert_eq!(records[0].check_status, CheckStatus::fail());
        assert!(records[0].required_value.contains("2.000"));
    }

    #[test]
    fn test_non_numeric_override_fails_invocation() {
        let checkers = LimitChecker::from_toml("checker_clearances", CLEARANCE_TOML).unwrap();
        let checker = &checkers[0];

        let mut model = IfcModel::new("IFC4");
        model.add_entity(space("s1", Some(1.5)));

        let mut config = CheckConfig::new();
        config.set("corridor_min_width", "wide");

        let result = checker.check(&model, &config);
        assert!(matches!(result, Err(CheckerError::Failed(_))));
    }

    #[test]
    fn test_empty_model_summary() {
        let checkers = LimitChecker::from_toml("checker_clearances", CLEARANCE_TOML).unwrap();
        let checker = &checkers[0];

        let model = IfcModel::new("IFC4");
        let records = checker.check(&model, &CheckConfig::new()).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].is_summary());
        assert_eq!(records[0].check_status, CheckStatus::warning());
        assert_eq!(records[0].actual_value, "0");
    }

    #[test]
    fn test_max_limit() {
        let toml = r#"
[[check]]
name = "check_space_depth"
element_type = "IfcSpace"
property = "(?i)width"
max = 1.0
"#;
        let checkers = LimitChecker::from_toml("checker_depth", toml).unwrap();

        let mut model = IfcModel::new("IFC4");
        model.add_entity(space("s1", Some(1.5)));

        let records = checkers[0].check(&model, &CheckConfig::new()).unwrap();
        assert_eq!(records[0].check_status, CheckStatus::fail());
        assert!(records[0].comment.as_deref().unwrap().contains("above"));
    }
}
