//! Unified error types for gputel
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP server failure (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// The collector returned a snapshot carrying an error
    #[error("Telemetry collection failed: {0}")]
    Collection(String),

    /// IO error (stdout, sockets)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from invoking external command-line tools
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Program is not installed or not on PATH
    #[error("Command not found: {0}")]
    NotFound(String),

    /// Program ran but exited unsuccessfully
    #[error("Command '{program}' failed (exit code {code:?}): {stderr}")]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Program did not finish within the configured timeout
    #[error("Command '{program}' timed out after {seconds}s")]
    TimedOut { program: String, seconds: u64 },

    /// Program could not be spawned for another reason
    #[error("Failed to spawn '{program}': {message}")]
    Spawn { program: String, message: String },
}

/// Errors from parsing tool output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required column or value is absent
    #[error("Missing field '{field}' in: {line}")]
    MissingField { field: &'static str, line: String },

    /// A value that must be numeric is not
    #[error("Invalid number for '{field}': '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// No line matched the expected label
    #[error("No line matching '{0}'")]
    NoMatch(&'static str),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors from service operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// External tool invocation failed
    #[error("{0}")]
    Probe(#[from] ProbeError),

    /// External tool output could not be parsed
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
