//! GPU telemetry record
//!
//! One normalized record per GPU, regardless of which tool produced it.

use crate::domain::Metric;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which collection path produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuType {
    /// Discrete NVIDIA GPU reported by nvidia-smi
    Cuda,
    /// Apple Silicon integrated GPU (Metal Performance Shaders)
    Mps,
}

impl fmt::Display for GpuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuType::Cuda => write!(f, "cuda"),
            GpuType::Mps => write!(f, "mps"),
        }
    }
}

/// GPU and memory-controller utilization in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Utilization {
    pub gpu: Metric<u32>,
    pub memory: Metric<u32>,
}

/// Memory usage in MiB
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoryUsage {
    pub total: Metric<u64>,
    pub free: Metric<u64>,
    pub used: Metric<u64>,
}

/// Power draw and limit in watts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Power {
    pub draw: Metric<f64>,
    pub limit: Metric<f64>,
}

/// Clock speeds in MHz
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Clocks {
    pub graphics: Metric<u32>,
    pub memory: Metric<u32>,
}

/// Fan speed in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Fan {
    pub speed: Metric<u32>,
}

/// Normalized telemetry for a single GPU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuRecord {
    /// GPU index (0-based)
    pub index: u32,
    /// GPU name (e.g., "NVIDIA GeForce RTX 4090")
    pub name: String,
    /// Driver version, when the tool reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_version: Option<String>,
    /// Core temperature in Celsius
    pub temperature: Metric<i32>,
    pub utilization: Utilization,
    pub memory: MemoryUsage,
    pub power: Power,
    pub clocks: Clocks,
    pub fan: Fan,
    #[serde(rename = "type")]
    pub gpu_type: GpuType,
    /// Raw chip model string (Apple Silicon only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Integrated GPU core count (Apple Silicon only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
}

impl GpuRecord {
    /// Create a record with every metric unknown
    pub fn new(index: u32, name: impl Into<String>, gpu_type: GpuType) -> Self {
        Self {
            index,
            name: name.into(),
            driver_version: None,
            temperature: Metric::Unknown,
            utilization: Utilization::default(),
            memory: MemoryUsage::default(),
            power: Power::default(),
            clocks: Clocks::default(),
            fan: Fan::default(),
            gpu_type,
            model: None,
            cores: None,
        }
    }

    /// Set the driver version
    pub fn with_driver_version(mut self, version: impl Into<String>) -> Self {
        self.driver_version = Some(version.into());
        self
    }

    /// Set the chip model string
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the core count
    pub fn with_cores(mut self, cores: Option<u32>) -> Self {
        self.cores = cores;
        self
    }

    /// Get a short display name
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("NVIDIA ").unwrap_or(&self.name)
    }
}

impl fmt::Display for GpuRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.index, self.name, self.gpu_type)
    }
}
