//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading the
//! scheduling settings record from a YAML file.

use std::fs;
use std::path::Path;

use crate::calculation::OvertimePolicy;
use crate::error::{EngineError, EngineResult};

use super::types::ScheduleSettings;

/// Loads and provides access to scheduling settings.
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/scheduling.yaml").unwrap();
/// if let Some(policy) = loader.overtime_policy() {
///     println!("Overtime beyond {} hours", policy.hours_limit);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    settings: ScheduleSettings,
}

impl SettingsLoader {
    /// Loads settings from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the settings file (e.g., "./config/scheduling.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `SettingsLoader` on success, or an error if the file is
    /// missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        let settings: ScheduleSettings =
            serde_yaml::from_str(&raw).map_err(|err| EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
        Ok(Self { settings })
    }

    /// Creates a loader around an already-resolved settings record.
    pub fn from_settings(settings: ScheduleSettings) -> Self {
        Self { settings }
    }

    /// Returns the loaded settings record.
    pub fn settings(&self) -> &ScheduleSettings {
        &self.settings
    }

    /// Resolves the active overtime policy from the loaded settings.
    pub fn overtime_policy(&self) -> Option<OvertimePolicy> {
        self.settings.overtime_policy()
    }
}
