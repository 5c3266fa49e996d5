//! Configuration file loading
//!
//! Handles loading configuration from TOML files.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the highest-precedence default location that parses
    pub fn load_default() -> Option<Config> {
        Self::load_first(&Self::default_paths())
    }

    /// Load the highest-precedence file in `paths` (ordered lowest first)
    pub fn load_first(paths: &[PathBuf]) -> Option<Config> {
        for path in paths.iter().rev() {
            if !path.exists() {
                continue;
            }
            match Self::load(path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return Some(config);
                }
                Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
            }
        }
        None
    }

    /// Get default configuration file paths, lowest precedence first
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // System-wide config
        paths.push(PathBuf::from("/etc/gputel/config.toml"));

        // User config
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("gputel").join("config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("gputel.toml"));
        paths.push(PathBuf::from(".gputel.toml"));

        paths
    }
}
