//! Application configuration.
//!
//! Loaded from `config.toml` in the platform data directory. A missing
//! file yields the defaults: a 52-week program indexed by calendar year and
//! the stock offline manifest.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::offline::manifest::AssetManifest;
use crate::program::DEFAULT_PROGRAM_WEEKS;
use crate::schedule::day_index::IndexMode;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Program settings
    pub program: ProgramSettings,
    /// Offline asset cache settings
    pub offline: OfflineSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            program: ProgramSettings::default(),
            offline: OfflineSettings::default(),
        }
    }
}

impl AppConfig {
    /// Path of the SQLite database inside the data directory.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("trainplan.db")
    }
}

/// Program-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramSettings {
    /// Program length in weeks
    pub weeks: u32,
    /// First day of the program. When unset, day indices follow the
    /// calendar year (January 1st is day 0).
    pub start_date: Option<NaiveDate>,
}

impl Default for ProgramSettings {
    fn default() -> Self {
        Self {
            weeks: DEFAULT_PROGRAM_WEEKS,
            start_date: None,
        }
    }
}

impl ProgramSettings {
    /// Total number of program days.
    pub fn total_days(&self) -> u32 {
        self.weeks.saturating_mul(7)
    }

    /// How calendar dates map onto program day indices.
    pub fn index_mode(&self) -> IndexMode {
        match self.start_date {
            Some(start) => IndexMode::Epoch { start },
            None => IndexMode::CalendarYear,
        }
    }
}

/// Offline asset cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineSettings {
    /// Cache generation tag; changing it invalidates older generations
    pub generation: String,
    /// Origin the assets are fetched from
    pub origin: String,
    /// Asset paths cached at install time
    pub assets: Vec<String>,
}

impl Default for OfflineSettings {
    fn default() -> Self {
        let manifest = AssetManifest::default();
        Self {
            generation: manifest.generation,
            origin: "http://localhost:8080".to_string(),
            assets: manifest.assets,
        }
    }
}

impl OfflineSettings {
    /// Build the install manifest from these settings.
    pub fn manifest(&self) -> AssetManifest {
        AssetManifest::new(self.generation.clone(), self.assets.clone())
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "trainplan", "TrainPlan")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_data_dir())
}

/// Load application configuration from `config.toml` inside `data_dir`.
pub fn load_config_from(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = data_dir.join("config.toml");

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir.to_path_buf();

    Ok(config)
}

/// Save application configuration into its data directory.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config.data_dir.join("config.toml");

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
