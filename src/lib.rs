//! gputel - GPU telemetry collector library
//!
//! This library collects point-in-time GPU telemetry from whichever vendor
//! tooling the host provides: nvidia-smi for NVIDIA GPUs, or sysctl,
//! vm_stat and system_profiler for Apple Silicon.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Telemetry records and snapshots
//! - [`error`]: Error types
//! - [`parse`]: Tool output parsers
//! - [`probe`]: External command abstraction layer
//! - [`server`]: HTTP endpoint
//! - [`services`]: Collection services

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod parse;
pub mod probe;
pub mod server;
pub mod services;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
