//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading report
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ReportError, ReportResult};

use super::types::{HolidaySet, ReportConfig};

/// Loads and provides access to a report configuration.
///
/// The configuration file is a single YAML document:
///
/// ```text
/// api_key: "..."
/// schedule_name: "ops_team_schedule"
/// month_start: 2024-03-01
/// holidays: "8,29"            # or a list: [8, 29]
/// api_url: "https://api.opsgenie.com"   # optional
/// timeout_secs: 30                      # optional
/// ```
///
/// # Example
///
/// ```no_run
/// use oncall_report::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/report.yaml")?;
/// println!("Schedule: {}", loader.config().schedule_name);
/// # Ok::<(), oncall_report::error::ReportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ReportConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing ([`ReportError::ConfigNotFound`])
    /// - The file contains invalid YAML or lacks a required field
    ///   ([`ReportError::ConfigParseError`])
    pub fn load<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ReportError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: ReportConfig =
            serde_yaml::from_str(&content).map_err(|e| ReportError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        debug!(
            path = %path_str,
            schedule = %config.schedule_name,
            month_start = %config.month_start,
            holidays = config.holidays.len(),
            "Loaded report configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Returns the underlying report configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Returns the configured holiday set.
    pub fn holidays(&self) -> &HolidaySet {
        &self.config.holidays
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ReportConfig {
        self.config
    }
}
