#![forbid(unsafe_code)]

//! Checker orchestration
//!
//! The [`Orchestrator`] drives one synchronous pass: discovery assembles the
//! checker registry, `run` invokes every selected checker against the model and
//! collects a [`RunReport`]. Execution is strictly sequential in registry order, so
//! two runs of the same registry against the same model produce identically ordered
//! results.
//!
//! Failure isolation: a checker that returns an error is recorded as failed in the
//! per-checker details and contributes no records; the run continues. Only
//! precondition violations (run before discover, unsupported model schema) abort
//! without a report. There is no per-checker timeout: a checker that never returns
//! blocks the run.
//!
//! The model is passed by shared reference to every checker in turn; the public
//! model API offers no interior mutability, so checkers are read-only observers.

use crate::checkers::{Checker, CheckerRegistry, LimitChecker, builtin::builtin_checkers};
use crate::config::CheckConfig;
use crate::engine::report::{CheckerDetail, CheckerOutcome, RunReport, RunSummary};
use crate::error::{DiscoveryError, OrchestratorError};
use crate::model::IfcModel;
use crate::record::ResultRecord;
use crate::types::{MODULE_PREFIX, TEMPLATE_FILE};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const SEPARATOR_WIDTH: usize = 70;

/// Discovers checkers and runs them against a model
pub struct Orchestrator {
    tools_dir: Option<PathBuf>,
    registry: Option<CheckerRegistry>,
    trace: Vec<String>,
}

impl Orchestrator {
    /// Creates an orchestrator over the builtin checker set only
    pub fn new() -> Self {
        Orchestrator {
            tools_dir: None,
            registry: None,
            trace: Vec::new(),
        }
    }

    /// Creates an orchestrator that also loads declarative checkers from a directory
    ///
    /// The directory must exist when `discover()` is called.
    pub fn with_tools_dir(dir: impl Into<PathBuf>) -> Self {
        Orchestrator {
            tools_dir: Some(dir.into()),
            registry: None,
            trace: Vec::new(),
        }
    }

    /// Creates an orchestrator over a pre-assembled registry
    ///
    /// This is the programmatic registration path: callers build a
    /// [`CheckerRegistry`] with their own `Checker` implementations and skip
    /// `discover()` entirely.
    pub fn from_registry(registry: CheckerRegistry) -> Self {
        Orchestrator {
            tools_dir: None,
            registry: Some(registry),
            trace: Vec::new(),
        }
    }

    /// Trace lines accumulated so far
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// The live registry, present once discovery has succeeded
    pub fn registry(&self) -> Option<&CheckerRegistry> {
        self.registry.as_ref()
    }

    /// Discovers checkers and replaces the live registry
    ///
    /// Assembles a fresh registry from the builtin set plus, when a tools directory
    /// is configured, every `checker_*.toml` file in it (lexicographic order,
    /// excluding the reserved template file). Returns the mapping from module
    /// identity to the checker names it contributes.
    ///
    /// Discovery is all-or-nothing: on any error the previous registry state is
    /// left untouched, so a successful `discover()` always means every advertised
    /// checker is callable. Calling it again fully replaces the registry.
    pub fn discover(&mut self) -> Result<BTreeMap<String, Vec<String>>, DiscoveryError> {
        let mut trace = Vec::new();
        let result = build_registry(self.tools_dir.as_deref(), &mut trace);
        self.trace.append(&mut trace);

        let registry = result?;
        let catalog = registry.catalog();
        self.registry = Some(registry);
        Ok(catalog)
    }

    /// Executes all discovered checkers against the model
    ///
    /// An optional `filter` restricts execution to modules whose identity contains
    /// the substring (case-insensitive). The configuration is forwarded unchanged
    /// to every checker.
    ///
    /// # Errors
    ///
    /// Returns `OrchestratorError::NotDiscovered` when no non-empty registry is
    /// present and `OrchestratorError::UnsupportedModel` when the model fails the
    /// schema guard. Both abort before any checker executes. Individual checker
    /// failures never surface here; they are reported inside the returned report.
    pub fn run(
        &mut self,
        model: &IfcModel,
        filter: Option<&str>,
        config: &CheckConfig,
    ) -> Result<RunReport, OrchestratorError> {
        let registry = self
            .registry
            .as_ref()
            .filter(|registry| !registry.is_empty())
            .ok_or(OrchestratorError::NotDiscovered)?;

        if !model.is_supported_schema() {
            return Err(OrchestratorError::UnsupportedModel(
                model.schema().to_string(),
            ));
        }

        let filter = filter.map(str::to_lowercase);
        let separator = "=".repeat(SEPARATOR_WIDTH);

        let mut trace = Vec::new();
        trace.push(separator.clone());
        trace.push("ORCHESTRATOR EXECUTION START".to_string());
        trace.push(separator.clone());

        let mut results: Vec<ResultRecord> = Vec::new();
        let mut checker_details = Vec::new();
        let mut total_checkers = 0;
        let mut successful_checkers = 0;
        let mut failed_checkers = 0;

        for (module, checkers) in registry.modules() {
            if let Some(filter) = &filter
                && !module.to_lowercase().contains(filter)
            {
                continue;
            }

            for checker in checkers {
                total_checkers += 1;
                let full_name = format!("{}::{}", module, checker.name());
                trace.push(format!("Running: {}", full_name));

                match checker.check(model, config) {
                    Ok(records) => {
                        if records.is_empty() {
                            trace.push("  ⚠ no results returned".to_string());
                        } else {
                            trace.push(format!("  ✓ {} result(s)", records.len()));
                        }
                        successful_checkers += 1;
                        checker_details.push(CheckerDetail {
                            checker: full_name,
                            outcome: CheckerOutcome::Success {
                                result_count: records.len(),
                            },
                        });
                        results.extend(
                            records
                                .into_iter()
                                .map(|record| ResultRecord::tag(record, module, checker.name())),
                        );
                    }
                    Err(error) => {
                        failed_checkers += 1;
                        trace.push(format!("  ✗ ERROR: {}", error));
                        checker_details.push(CheckerDetail {
                            checker: full_name,
                            outcome: CheckerOutcome::Failed {
                                error: error.to_string(),
                            },
                        });
                    }
                }
            }
        }

        trace.push(separator.clone());
        trace.push("ORCHESTRATOR EXECUTION COMPLETE".to_string());
        trace.push(format!(
            "  Checkers run: {}/{}",
            successful_checkers, total_checkers
        ));
        trace.push(format!("  Results collected: {}", results.len()));
        trace.push(separator);

        self.trace.extend(trace);

        Ok(RunReport {
            summary: RunSummary {
                total_checkers,
                successful_checkers,
                failed_checkers,
                total_results: results.len(),
                checker_details,
            },
            results,
            log: self.trace.clone(),
        })
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot convenience: discover and run in a single call
pub fn run_all_checks(
    model: &IfcModel,
    tools_dir: Option<&Path>,
    config: &CheckConfig,
) -> Result<RunReport, OrchestratorError> {
    let mut orchestrator = match tools_dir {
        Some(dir) => Orchestrator::with_tools_dir(dir),
        None => Orchestrator::new(),
    };
    orchestrator.discover()?;
    orchestrator.run(model, None, config)
}

/// Assemble a fresh registry from the builtin set plus the tools directory
fn build_registry(
    tools_dir: Option<&Path>,
    trace: &mut Vec<String>,
) -> Result<CheckerRegistry, DiscoveryError> {
    let mut registry = CheckerRegistry::new();

    for checker in builtin_checkers()? {
        registry.register(checker)?;
    }
    trace.push(format!(
        "Registered {} builtin checker module(s)",
        registry.module_count()
    ));

    let Some(dir) = tools_dir else {
        return Ok(registry);
    };

    if !dir.exists() {
        return Err(DiscoveryError::DirectoryNotFound(dir.to_path_buf()));
    }
    trace.push(format!("Scanning tools directory: {}", dir.display()));

    let entries = fs::read_dir(dir).map_err(|e| DiscoveryError::DirectoryRead {
        dir: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::DirectoryRead {
            dir: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.starts_with(MODULE_PREFIX) || !file_name.ends_with(".toml") {
            continue;
        }
        if file_name == TEMPLATE_FILE {
            continue;
        }
        files.push(path);
    }
    files.sort();

    trace.push(format!("Found {} checker file(s)", files.len()));

    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let checkers = match LimitChecker::from_path(&path) {
            Ok(checkers) => checkers,
            Err(error) => {
                trace.push(format!("  ✗ {}: {}", file_name, error));
                return Err(error);
            }
        };

        if checkers.is_empty() {
            trace.push(format!("  ⚠ {}: no checks declared", file_name));
            continue;
        }

        let names: Vec<String> = checkers.iter().map(|c| c.name().to_string()).collect();
        trace.push(format!(
            "  ✓ {}: found {} check(s) - {}",
            file_name,
            names.len(),
            names.join(", ")
        ));
        for checker in checkers {
            registry.register(Box::new(checker))?;
        }
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::Checker;
    use crate::error::CheckerError;
    use crate::model::{Entity, Property, PropertySet, PropertyValue};
    use crate::record::CheckRecord;
    use crate::types::CheckStatus;

    fn door(global_id: &str, width: f64) -> Entity {
        Entity {
            global_id: global_id.to_string(),
            ifc_type: "IfcDoor".to_string(),
            name: Some(format!("Door {}", global_id)),
            long_name: None,
            property_sets: vec![PropertySet {
                name: "Pset_DoorCommon".to_string(),
                properties: vec![Property {
                    name: "OverallWidth".to_string(),
                    value: PropertyValue::Real(width),
                }],
            }],
        }
    }

    fn sample_model() -> IfcModel {
        let mut model = IfcModel::new("IFC4");
        model.add_entity(door("d1", 0.9));
        model.add_entity(door("d2", 0.7));
        model
    }

    struct FailingChecker;

    impl Checker for FailingChecker {
        fn module(&self) -> &str {
            "checker_broken"
        }

        fn name(&self) -> &str {
            "check_always_fails"
        }

        fn description(&self) -> &str {
            "always fails"
        }

        fn check(
            &self,
            _model: &IfcModel,
            _config: &CheckConfig,
        ) -> Result<Vec<CheckRecord>, CheckerError> {
            Err(CheckerError::Failed("synthetic failure".to_string()))
        }
    }

    struct EmptyChecker;

    impl Checker for EmptyChecker {
        fn module(&self) -> &str {
            "checker_empty"
        }

        fn name(&self) -> &str {
            "check_nothing"
        }

        fn description(&self) -> &str {
            "returns no records"
        }

        fn check(
            &self,
            _model: &IfcModel,
            _config: &CheckConfig,
        ) -> Result<Vec<CheckRecord>, CheckerError> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_run_before_discover_fails() {
        let mut orchestrator = Orchestrator::new();
        let result = orchestrator.run(&sample_model(), None, &CheckConfig::new());
        assert!(matches!(result, Err(OrchestratorError::NotDiscovered)));
    }

    #[test]
    fn test_run_with_empty_registry_fails() {
        let mut orchestrator = Orchestrator::from_registry(CheckerRegistry::new());
        let result = orchestrator.run(&sample_model(), None, &CheckConfig::new());
        assert!(matches!(result, Err(OrchestratorError::NotDiscovered)));
    }

    #[test]
    fn test_unsupported_schema_aborts_before_execution() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.discover().unwrap();

        let model = IfcModel::new("CityGML");
        let result = orchestrator.run(&model, None, &CheckConfig::new());
        match result {
            Err(OrchestratorError::UnsupportedModel(schema)) => assert_eq!(schema, "CityGML"),
            other => panic!("expected UnsupportedModel, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_discover_catalogs_builtins() {
        let mut orchestrator = Orchestrator::new();
        let catalog = orchestrator.discover().unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(
            catalog["checker_doors"],
            vec!["check_door_accessibility".to_string()]
        );
        // catalog iterates lexicographically
        let modules: Vec<&String> = catalog.keys().collect();
        let mut sorted = modules.clone();
        sorted.sort();
        assert_eq!(modules, sorted);
    }

    #[test]
    fn test_run_produces_full_report() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.discover().unwrap();

        let report = orchestrator
            .run(&sample_model(), None, &CheckConfig::new())
            .unwrap();

        assert_eq!(report.summary.total_checkers, 5);
        assert_eq!(report.summary.successful_checkers, 5);
        assert_eq!(report.summary.failed_checkers, 0);
        assert_eq!(report.summary.total_results, report.results.len());
        assert!(report.log.iter().any(|l| l.contains("EXECUTION COMPLETE")));

        // two doors + summary from doors module, one warning summary from each
        // of the other four modules
        assert_eq!(report.results.len(), 7);
    }

    #[test]
    fn test_provenance_attached_to_every_record() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.discover().unwrap();

        let report = orchestrator
            .run(&sample_model(), None, &CheckConfig::new())
            .unwrap();

        for record in &report.results {
            assert!(record.checker_file.starts_with("checker_"));
            assert!(record.checker_function.starts_with("check_"));
        }
    }

    #[test]
    fn test_results_follow_module_order() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.discover().unwrap();

        let report = orchestrator
            .run(&sample_model(), None, &CheckConfig::new())
            .unwrap();

        let modules: Vec<&str> = report
            .results
            .iter()
            .map(|r| r.checker_file.as_str())
            .collect();
        let mut sorted = modules.clone();
        sorted.sort();
        assert_eq!(modules, sorted);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.discover().unwrap();

        let report = orchestrator
            .run(&sample_model(), Some("DOORS"), &CheckConfig::new())
            .unwrap();

        assert_eq!(report.summary.total_checkers, 1);
        assert!(
            report
                .results
                .iter()
                .all(|r| r.checker_file == "checker_doors")
        );
    }

    #[test]
    fn test_filter_matching_nothing_yields_empty_report() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.discover().unwrap();

        let report = orchestrator
            .run(&sample_model(), Some("elevators"), &CheckConfig::new())
            .unwrap();

        assert_eq!(report.summary.total_checkers, 0);
        assert!(report.results.is_empty());
    }

    #[test]
    fn test_failing_checker_is_isolated() {
        let mut registry = CheckerRegistry::new();
        registry.register(Box::new(FailingChecker)).unwrap();
        for checker in builtin_checkers().unwrap() {
            registry.register(checker).unwrap();
        }

        let mut orchestrator = Orchestrator::from_registry(registry);
        let report = orchestrator
            .run(&sample_model(), None, &CheckConfig::new())
            .unwrap();

        assert_eq!(report.summary.total_checkers, 6);
        assert_eq!(report.summary.failed_checkers, 1);
        assert_eq!(report.summary.successful_checkers, 5);

        // the failing checker contributes no records at all
        assert!(
            report
                .results
                .iter()
                .all(|r| r.checker_file != "checker_broken")
        );

        let detail = report
            .summary
            .checker_details
            .iter()
            .find(|d| d.checker.starts_with("checker_broken"))
            .unwrap();
        match &detail.outcome {
            CheckerOutcome::Failed { error } => assert_eq!(error, "synthetic failure"),
            other => panic!("expected failed outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_result_list_is_success_with_zero_count() {
        let mut registry = CheckerRegistry::new();
        registry.register(Box::new(EmptyChecker)).unwrap();

        let mut orchestrator = Orchestrator::from_registry(registry);
        let report = orchestrator
            .run(&sample_model(), None, &CheckConfig::new())
            .unwrap();

        assert_eq!(report.summary.successful_checkers, 1);
        assert_eq!(report.summary.failed_checkers, 0);
        assert_eq!(
            report.summary.checker_details[0].outcome,
            CheckerOutcome::Success { result_count: 0 }
        );
        assert!(report.log.iter().any(|l| l.contains("no results returned")));
    }

    #[test]
    fn test_rediscovery_replaces_registry() {
        let mut orchestrator = Orchestrator::new();
        let first = orchestrator.discover().unwrap();
        let second = orchestrator.discover().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_all_checks_one_shot() {
        let report = run_all_checks(&sample_model(), None, &CheckConfig::new()).unwrap();
        assert_eq!(report.summary.total_checkers, 5);
    }

    #[test]
    fn test_config_forwarded_to_all_checkers() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.discover().unwrap();

        // 0.9 door passes by default; raising min_width through config fails it
        let mut config = CheckConfig::new();
        config.set("min_width", 0.95);

        let report = orchestrator
            .run(&sample_model(), Some("doors"), &config)
            .unwrap();

        let failing: Vec<_> = report
            .results
            .iter()
            .filter(|r| r.record.check_status == CheckStatus::fail() && !r.record.is_summary())
            .collect();
        assert_eq!(failing.len(), 2);
    }
}
