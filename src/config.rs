use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;

pub const DEFAULT_DB_PATH: &str = "./setcoach.db";

/// Flat key/value settings stored as TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    pub map: BTreeMap<String, String>,
}

/// `<config dir>/setcoach/config`.
pub fn config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("setcoach").join("config"))
        .context("Could not determine config directory")
}

impl Config {
    /// Missing file means empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        let raw = toml::to_string(self)?;
        fs::write(path, raw).with_context(|| format!("Failed to save config to {}", path.display()))
    }

    pub fn db_path(&self) -> &str {
        self.map
            .get("db_path")
            .map(String::as_str)
            .unwrap_or(DEFAULT_DB_PATH)
    }

    /// `log_level`, falling back to warn for missing or unknown values.
    pub fn log_level(&self) -> Level {
        self.map
            .get("log_level")
            .and_then(|l| l.parse().ok())
            .unwrap_or(Level::WARN)
    }

    pub fn default_body_weight(&self) -> Option<f64> {
        self.parse_f64("default_body_weight")
    }

    pub fn default_waist(&self) -> Option<f64> {
        self.parse_f64("default_waist")
    }

    fn parse_f64(&self, key: &str) -> Option<f64> {
        let raw = self.map.get(key)?;
        match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring non-numeric config value");
                None
            }
        }
    }
}
