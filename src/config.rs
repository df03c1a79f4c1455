use crate::clients::keys::ApiKeys;
use crate::types::task::Task;
use crate::types::tier::Tiers;
use crate::validation::admission::AdmissionOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse configuration")]
    Parse(#[from] serde_json::Error),
}

/// Everything a collector needs, as read from a JSON document.
///
/// Only `tasks` is required. Omitted tiers count as `none` (no quota), and an
/// omitted `data_dir` means the platform data directory.
///
/// # Examples
///
/// ```
/// use weather_collector::{CollectorConfig, OwmTier, Provider};
///
/// let config = CollectorConfig::from_json_str(r#"{
///     "tasks": [
///         { "location": { "latitude": 52.52, "longitude": 13.40 },
///           "provider": "openweathermap", "data": "current", "interval": 600 }
///     ],
///     "tiers": { "owm": "free" },
///     "api_keys": { "openweathermap": "secret" }
/// }"#)?;
///
/// assert_eq!(config.tasks.len(), 1);
/// assert_eq!(config.tiers.owm, OwmTier::Free);
/// assert!(config.api_keys.contains(Provider::OpenWeatherMap));
/// # Ok::<(), weather_collector::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectorConfig {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub tiers: Tiers,
    #[serde(default)]
    pub api_keys: ApiKeys,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub abort_on_exceeded_limits: bool,
    #[serde(default)]
    pub ignore_limits: bool,
}

impl CollectorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_json_str(&json)
    }

    pub fn admission_options(&self, silent: bool) -> AdmissionOptions {
        AdmissionOptions {
            silent,
            abort_on_exceeded_limits: self.abort_on_exceeded_limits,
            ignore_limits: self.ignore_limits,
        }
    }
}
