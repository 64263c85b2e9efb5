//! Configuration management for the CLI
//!
//! Configuration is assembled from:
//! - Default values
//! - A configuration file (TOML, JSON or YAML, chosen by extension)
//! - `NICKEL_SHIM_*` environment variables for the engine section

use crate::error::{Error, Result};
use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".nickel-shim.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings handed to every evaluation context
    pub engine: nickel_shim_core::Config,

    /// Logging settings
    pub logging: LoggingSection,

    /// Output settings
    pub output: OutputSection,
}

/// `[logging]` section; unset keys leave the verbosity-derived defaults alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or `EnvFilter` directive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<LogFormat>,
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Use colored output when the terminal supports it
    pub color: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };

        config
            .engine
            .validate()
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations, then
    /// apply environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };

        config.engine.merge_with_env();
        config
            .engine
            .validate()
            .map_err(|e| Error::config(e.to_string()))?;
        Ok(config)
    }

    /// Configuration files searched when no `--config` is given, in order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(PROJECT_CONFIG_FILE)];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("nickel-shim").join("config.toml"));
        }

        paths
    }
}
