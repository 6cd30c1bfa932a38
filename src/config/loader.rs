//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! rules from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{JurisdictionMetadata, PayrollConfig, PayrollRules};

/// Loads and provides access to payroll rules.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and selects the rule set effective on a given date.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/kr_payroll/
/// ├── payroll.yaml        # Jurisdiction metadata
/// └── rules/
///     └── 2025-01-01.yaml # Rules effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/kr_payroll").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// let rules = loader.rules_for(date).unwrap();
/// println!("Probation rate: {}", rules.probation_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/kr_payroll")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The rules directory holds no rule files
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("payroll.yaml"))?;
        let rules = Self::load_rules(&path.join("rules"))?;

        debug!(
            code = %metadata.code,
            rule_sets = rules.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(metadata, rules),
        })
    }

    /// Creates a loader holding only the rules built into the engine.
    pub fn builtin() -> Self {
        Self {
            config: PayrollConfig::default(),
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

    /// Loads all rule files from the rules directory.
    fn load_rules(rules_dir: &Path) -> EngineResult<Vec<PayrollRules>> {
        let rules_dir_str = rules_dir.display().to_string();

        let entries = fs::read_dir(rules_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rules_dir_str.clone(),
        })?;

        let mut rules = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rules_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rules.push(Self::load_yaml::<PayrollRules>(&path)?);
            }
        }

        if rules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rule files found)", rules_dir_str),
            });
        }

        Ok(rules)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn metadata(&self) -> &JurisdictionMetadata {
        self.config.metadata()
    }

    /// Gets the rule set in effect on a given date.
    ///
    /// The method finds the most recent rule set that is effective
    /// on or before the given date.
    ///
    /// # Returns
    ///
    /// Returns the rules, or `RulesNotFound` if every rule set starts after `date`.
    pub fn rules_for(&self, date: NaiveDate) -> EngineResult<&PayrollRules> {
        self.config
            .rules()
            .iter()
            .rfind(|r| r.effective_date <= date)
            .ok_or(EngineError::RulesNotFound { date })
    }
}
