//! Checker configuration file.
//!
//! Lives (by default) at `piracy-checker.json` in the working directory and
//! supplies defaults the CLI flags can override.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "piracy-checker.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serializable checker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Config format version.
    pub config_version: String,
    /// Treat third-party stores as piracy indicators.
    #[serde(default)]
    pub include_stores: bool,
    /// Optional JSON/YAML file with additional app definitions.
    ///
    /// Relative paths are resolved against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_apps_path: Option<String>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self { config_version: "0.1.0".to_string(), include_stores: false, extra_apps_path: None }
    }
}

impl CheckerConfig {
    /// Load config JSON from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        serde_json::from_str(&json)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Write config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        fs::write(path, json)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }

    /// Resolve `extra_apps_path` relative to the directory holding `config_path`.
    pub fn resolved_extra_apps_path(&self, config_path: &Path) -> Option<PathBuf> {
        let raw = Path::new(self.extra_apps_path.as_deref()?);
        if raw.is_absolute() {
            return Some(raw.to_path_buf());
        }
        let base = config_path.parent().unwrap_or_else(|| Path::new(""));
        Some(base.join(raw))
    }
}
