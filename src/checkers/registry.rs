#![forbid(unsafe_code)]

//! Checker registry
//!
//! The registry indexes checkers by module identity. Modules iterate in
//! lexicographic order and checkers within a module in registration order, which is
//! what makes run reports reproducible across identical runs. A registry is always
//! built whole: discovery assembles a fresh registry and swaps it in only on
//! success, so callers never observe a partially-loaded set.

use crate::checkers::Checker;
use crate::error::DiscoveryError;
use crate::types::{CHECK_PREFIX, MODULE_PREFIX};
use std::collections::BTreeMap;

/// Registry of checkers grouped by module identity
#[derive(Default)]
pub struct CheckerRegistry {
    modules: BTreeMap<String, Vec<Box<dyn Checker>>>,
}

impl CheckerRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a checker under its module identity
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError` if the module identity or checker name falls outside
    /// the naming convention, or if the `(module, name)` pair is already registered.
    pub fn register(&mut self, checker: Box<dyn Checker>) -> Result<(), DiscoveryError> {
        let module = checker.module().to_string();
        let name = checker.name().to_string();

        if !module.starts_with(MODULE_PREFIX) {
            return Err(DiscoveryError::InvalidModuleName { module });
        }
        if !name.starts_with(CHECK_PREFIX) {
            return Err(DiscoveryError::InvalidCheckerName { module, name });
        }

        let entries = self.modules.entry(module.clone()).or_default();
        if entries.iter().any(|existing| existing.name() == name) {
            return Err(DiscoveryError::DuplicateChecker { module, name });
        }

        entries.push(checker);
        Ok(())
    }

    /// Iterate modules in lexicographic order, checkers in registration order
    pub fn modules(&self) -> impl Iterator<Item = (&str, &[Box<dyn Checker>])> {
        self.modules
            .iter()
            .map(|(module, checkers)| (module.as_str(), checkers.as_slice()))
    }

    /// Iterate every checker, module by module
    pub fn checkers(&self) -> impl Iterator<Item = &dyn Checker> {
        self.modules
            .values()
            .flat_map(|checkers| checkers.iter().map(|boxed| boxed.as_ref()))
    }

    /// Mapping from module identity to the checker names it contributes
    pub fn catalog(&self) -> BTreeMap<String, Vec<String>> {
        self.modules
            .iter()
            .map(|(module, checkers)| {
                (
                    module.clone(),
                    checkers.iter().map(|c| c.name().to_string()).collect(),
                )
            })
            .collect()
    }

    /// Number of registered checkers across all modules
    pub fn len(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }

    /// Number of registered modules
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry holds no checkers
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
