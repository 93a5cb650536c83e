use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::model::Units;
use crate::provider::openweather::DEFAULT_TIMEOUT;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeatherMap API key.
    pub api_key: Option<String>,

    /// Default measurement units: "metric", "imperial" or "kelvin".
    pub units: Option<String>,

    /// Outbound request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist
    /// yet. The `OPENWEATHERMAP_API_KEY` environment variable, when set and
    /// non-empty, overrides the stored key; the override is resolved here so
    /// nothing downstream reads ambient state.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                cfg.api_key = Some(key);
            }
        }

        Ok(cfg)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weathering", "weathering-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the API key, if a non-empty one is present.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Default units as a strongly-typed value; unset means metric.
    pub fn default_units(&self) -> Result<Units> {
        match &self.units {
            None => Ok(Units::default()),
            Some(s) => Units::try_from(s.as_str()),
        }
    }

    /// Outbound request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_api_key() {
        let cfg = Config::default();
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let cfg = Config { api_key: Some(String::new()), ..Default::default() };
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn set_api_key_is_visible() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        assert_eq!(cfg.api_key(), Some("KEY"));
    }

    #[test]
    fn default_units_fall_back_to_metric() {
        let cfg = Config::default();
        assert_eq!(cfg.default_units().unwrap(), Units::Metric);
    }

    #[test]
    fn configured_units_are_parsed() {
        let cfg = Config { units: Some("imperial".to_string()), ..Default::default() };
        assert_eq!(cfg.default_units().unwrap(), Units::Imperial);
    }

    #[test]
    fn bad_units_error() {
        let cfg = Config { units: Some("bogus".to_string()), ..Default::default() };
        assert!(cfg.default_units().is_err());
    }

    #[test]
    fn timeout_defaults_to_ten_seconds() {
        let cfg = Config::default();
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn timeout_is_configurable() {
        let cfg = Config { timeout_secs: Some(3), ..Default::default() };
        assert_eq!(cfg.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            units: Some("metric".to_string()),
            timeout_secs: Some(5),
        };

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.api_key(), Some("KEY"));
        assert_eq!(parsed.units.as_deref(), Some("metric"));
        assert_eq!(parsed.timeout_secs, Some(5));
    }
}
