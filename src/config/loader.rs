//! Rule-table loading functionality.
//!
//! This module provides the [`RuleLoader`] type for loading the engine's
//! rule tables from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionsConfig, ReconciliationRules, RuleSet, ScheduleRules};

/// Loads and provides access to the engine's rule tables.
///
/// The `RuleLoader` reads YAML rule files from a directory and exposes the
/// aggregated [`RuleSet`]. The compiled-in defaults are available through
/// [`RuleLoader::builtin`] for callers that ship no files.
///
/// # Directory Structure
///
/// ```text
/// config/rules/
/// ├── jurisdictions.yaml   # per-jurisdiction deadline rule tables
/// ├── schedule.yaml        # pay-date scheduling parameters
/// └── reconciliation.yaml  # anomaly threshold and ordering
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_compliance::config::RuleLoader;
///
/// let loader = RuleLoader::load("./config/rules").unwrap();
/// let india = loader.rules().jurisdiction("IN").unwrap();
/// println!("Jurisdiction: {}", india.name);
/// ```
#[derive(Debug, Clone)]
pub struct RuleLoader {
    rules: RuleSet,
}

impl RuleLoader {
    /// Loads rule tables from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the rules directory (e.g., "./config/rules")
    ///
    /// # Returns
    ///
    /// Returns a `RuleLoader` instance on success, or an error if any
    /// required file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let jurisdictions =
            Self::load_yaml::<JurisdictionsConfig>(&path.join("jurisdictions.yaml"))?;
        let schedule = Self::load_yaml::<ScheduleRules>(&path.join("schedule.yaml"))?;
        let reconciliation =
            Self::load_yaml::<ReconciliationRules>(&path.join("reconciliation.yaml"))?;

        Ok(Self {
            rules: RuleSet::new(jurisdictions.jurisdictions, schedule, reconciliation),
        })
    }

    /// Returns a loader backed by the compiled-in default rule set.
    pub fn builtin() -> Self {
        Self {
            rules: RuleSet::builtin(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the aggregated rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
