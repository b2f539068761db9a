//! Configuration file support for the workout log.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/wlog/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_store_file")]
    pub store_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store_file: default_store_file(),
        }
    }
}

/// Report rendering configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Width of a full chart bar, in terminal cells
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chart_width: default_chart_width(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(base) => base.join("wlog"),
        None => home_dir_or_cwd().join(".local/share/wlog"),
    }
}

fn default_store_file() -> String {
    "workouts.csv".into()
}

fn default_chart_width() -> usize {
    40
}

fn home_dir_or_cwd() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values that would make the tool unusable
    pub fn validate(&self) -> Result<()> {
        if self.data.store_file.trim().is_empty() {
            return Err(Error::Config("data.store_file must not be empty".into()));
        }
        if self.report.chart_width == 0 {
            return Err(Error::Config("report.chart_width must be at least 1".into()));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_dir_or_cwd().join(".config"));
        base.join("wlog").join("config.toml")
    }

    /// Full path of the workout store
    pub fn store_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.store_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.store_file, "workouts.csv");
        assert_eq!(config.report.chart_width, 40);
        assert!(config.store_path().ends_with("wlog/workouts.csv"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.data.data_dir = temp_dir.path().join("data");
        config.report.chart_width = 25;
        std::fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.data.data_dir, config.data.data_dir);
        assert_eq!(loaded.report.chart_width, 25);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[data]
store_file = "lifts.csv"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data.store_file, "lifts.csv");
        assert_eq!(config.report.chart_width, 40); // default
    }

    #[test]
    fn test_zero_chart_width_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[report]\nchart_width = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
