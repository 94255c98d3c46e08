use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Provider limit for `days` on `forecast.json`.
pub const MAX_FORECAST_DAYS: u8 = 14;
pub const DEFAULT_FORECAST_DAYS: u8 = 3;

/// Credentials and endpoint for WeatherAPI.com.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,

    /// Overrides the public endpoint, mostly useful against a local stub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// forecast_days = 3
///
/// [weatherapi]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weatherapi: Option<ProviderConfig>,
}

fn default_forecast_days() -> u8 {
    DEFAULT_FORECAST_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self { forecast_days: DEFAULT_FORECAST_DAYS, weatherapi: None }
    }
}

impl Config {
    /// Load config from the platform location, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or return defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        validate_forecast_days(cfg.forecast_days)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citycast", "citycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set or replace the API key, keeping any custom base URL.
    pub fn set_api_key(&mut self, api_key: String) {
        match &mut self.weatherapi {
            Some(provider) => provider.api_key = api_key,
            None => self.weatherapi = Some(ProviderConfig { api_key, base_url: None }),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.weatherapi.as_ref().map(|cfg| cfg.api_key.as_str())
    }

    pub fn set_forecast_days(&mut self, days: u8) -> Result<()> {
        validate_forecast_days(days)?;
        self.forecast_days = days;
        Ok(())
    }
}

pub fn validate_forecast_days(days: u8) -> Result<()> {
    if !(1..=MAX_FORECAST_DAYS).contains(&days) {
        bail!("forecast_days must be between 1 and {MAX_FORECAST_DAYS}, got {days}");
    }
    Ok(())
}
