// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Configuration module

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::automation::DEFAULT_AC_THRESHOLD;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Log level
    pub log_level: String,

    /// Sensor generator configuration
    pub sensors: SensorConfig,

    /// Automatic controller configuration
    pub automation: AutomationConfig,

    /// GUI configuration
    pub gui: GuiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Casa".to_string(),
            log_level: "info".to_string(),
            sensors: SensorConfig::default(),
            automation: AutomationConfig::default(),
            gui: GuiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load configuration if the file exists, defaults otherwise. Never writes.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// An explicit path must exist; otherwise the per-user file is read if present
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        match explicit {
            Some(path) => Ok((Self::load(path)?, Some(path.to_path_buf()))),
            None => {
                let path = Self::default_path();
                let source = path.exists().then(|| path.clone());
                Ok((Self::load_or_default(&path)?, source))
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.sensors.validate()?;
        self.automation.validate()?;
        ensure!(self.gui.history_len > 0, "gui.history_len must be positive");
        Ok(())
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("casa-sim"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Sensor generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Time between generated readings in milliseconds
    pub period_ms: u64,

    pub temperature_min: f64,
    pub temperature_max: f64,

    pub humidity_min: f64,
    pub humidity_max: f64,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            period_ms: 2000,
            temperature_min: 18.0,
            temperature_max: 35.0,
            humidity_min: 30.0,
            humidity_max: 70.0,
            seed: None,
        }
    }
}

impl SensorConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.period_ms > 0, "sensors.period_ms must be positive");
        ensure!(
            self.temperature_min.is_finite() && self.temperature_max.is_finite(),
            "sensors temperature range must be finite"
        );
        ensure!(
            self.temperature_min < self.temperature_max,
            "sensors.temperature_min ({}) must be below temperature_max ({})",
            self.temperature_min,
            self.temperature_max
        );
        ensure!(
            self.humidity_min.is_finite() && self.humidity_max.is_finite(),
            "sensors humidity range must be finite"
        );
        ensure!(
            self.humidity_min < self.humidity_max,
            "sensors.humidity_min ({}) must be below humidity_max ({})",
            self.humidity_min,
            self.humidity_max
        );
        Ok(())
    }
}

/// Automatic controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationConfig {
    /// Time between evaluations in milliseconds
    pub period_ms: u64,

    /// AC runs strictly above this temperature
    pub ac_threshold: f64,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            period_ms: 500,
            ac_threshold: DEFAULT_AC_THRESHOLD,
        }
    }
}

impl AutomationConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.period_ms > 0, "automation.period_ms must be positive");
        ensure!(self.ac_threshold.is_finite(), "automation.ac_threshold must be finite");
        Ok(())
    }
}

/// GUI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// Theme
    pub theme: Theme,

    /// Draw glyph icons next to labels; plain text otherwise
    pub show_icons: bool,

    /// Number of sensor samples kept for the history plot
    pub history_len: usize,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 640,
            theme: Theme::Light,
            show_icons: true,
            history_len: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
    System,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.sensors.period(), Duration::from_secs(2));
        assert_eq!(config.automation.period(), Duration::from_millis(500));
        assert_eq!(config.automation.ac_threshold, 28.0);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [automation]
            ac_threshold = 26.5

            [sensors]
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.automation.ac_threshold, 26.5);
        assert_eq!(config.automation.period_ms, 500);
        assert_eq!(config.sensors.seed, Some(7));
        assert_eq!(config.sensors.temperature_max, 35.0);
        assert_eq!(config.gui, GuiConfig::default());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = Config::default();
        config.sensors.humidity_min = 80.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.automation.period_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults_without_writing() {
        let dir = std::env::temp_dir().join(format!("casa-sim-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        let _ = std::fs::remove_dir_all(&dir);

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(!path.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let path = std::env::temp_dir()
            .join(format!("casa-sim-missing-{}", std::process::id()))
            .join("config.toml");
        assert!(Config::resolve(Some(&path)).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_saved_file_is_loaded() {
        let dir = std::env::temp_dir().join(format!("casa-sim-saved-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        let mut config = Config::default();
        config.automation.ac_threshold = 30.0;
        config.save(&path).unwrap();

        let (loaded, source) = Config::resolve(Some(&path)).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(source, Some(path.clone()));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
