//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading leave policy
//! and company holiday calendars from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::Holiday;

use super::types::{EngineConfig, HolidayFile, LeavePolicy};

/// Loads and provides access to leave accounting configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml      # Monthly credit, default week-off, payroll divisor
/// └── holidays/
///     └── 2025.yaml    # Company holidays for the year
/// ```
///
/// `policy.yaml` is required. The `holidays/` directory is optional: without
/// it the engine runs with no holidays and sandwich detection simply finds
/// fewer patterns. A holiday file that fails to parse is logged and skipped.
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Monthly credit: {}", loader.policy().monthly_credit);
/// println!("Holidays: {}", loader.holidays().len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if `policy.yaml` is
    /// missing or invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<LeavePolicy>(&policy_path)?;

        let holidays_dir = path.join("holidays");
        let holidays = Self::load_holidays(&holidays_dir)?;

        info!(
            policy = %policy.name,
            monthly_credit = policy.monthly_credit,
            holidays = holidays.len(),
            "Loaded leave configuration"
        );

        Ok(Self {
            config: EngineConfig::new(policy, holidays),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
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

    /// Loads and merges every holiday file in the holidays directory.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<Vec<Holiday>> {
        let holidays_dir_str = holidays_dir.display().to_string();

        if !holidays_dir.exists() {
            warn!(
                path = %holidays_dir_str,
                "Holiday directory not found, continuing without holidays"
            );
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: holidays_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: holidays_dir_str.clone(),
            })?;
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut holidays = Vec::new();
        for path in paths {
            match Self::load_yaml::<HolidayFile>(&path) {
                Ok(file) => holidays.extend(file.holidays),
                Err(err) => warn!(
                    path = %path.display(),
                    error = %err,
                    "Skipping unreadable holiday file"
                ),
            }
        }

        Ok(holidays)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the leave policy.
    pub fn policy(&self) -> &LeavePolicy {
        self.config.policy()
    }

    /// Returns the configured company holidays.
    pub fn holidays(&self) -> &[Holiday] {
        self.config.holidays()
    }
}
