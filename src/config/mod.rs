//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::error::ConfigError;
use crate::probe::DEFAULT_COMMAND_TIMEOUT;
use crate::services::nvidia_service::NVIDIA_SMI;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Collector settings
    pub collector: CollectorConfig,
    /// HTTP server settings
    pub server: ServerConfig,
}

impl Config {
    /// Reject values that would make the collector or server unusable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collector.command_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "collector.command_timeout_seconds".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.collector.nvidia_smi.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "collector.nvidia_smi".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.port".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
}

/// Collector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Upper bound for each external tool invocation
    pub command_timeout_seconds: u64,
    /// Name or path of the nvidia-smi binary
    pub nvidia_smi: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            command_timeout_seconds: DEFAULT_COMMAND_TIMEOUT.as_secs(),
            nvidia_smi: NVIDIA_SMI.to_string(),
        }
    }
}

impl CollectorConfig {
    /// Per-command timeout as a Duration
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_seconds)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub bind: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl ServerConfig {
    /// `bind:port` string suitable for a TCP listener
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
