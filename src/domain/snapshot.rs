//! Point-in-time telemetry snapshot

use crate::domain::{GpuRecord, GpuType, Platform};
use serde::Serialize;

/// Result of one collection pass
///
/// Built fresh for every request and never mutated after being returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    /// nvidia-smi was found on this host
    pub has_nvidia_smi: bool,
    /// An Apple Silicon GPU was detected
    pub has_mps: bool,
    pub platform: Platform,
    pub gpus: Vec<GpuRecord>,
    /// Set only when collection failed as a whole
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TelemetrySnapshot {
    /// An empty, successful snapshot for the given platform
    pub fn empty(platform: Platform) -> Self {
        Self {
            has_nvidia_smi: false,
            has_mps: false,
            platform,
            gpus: Vec::new(),
            error: None,
        }
    }

    /// A failed snapshot: all flags false, no GPUs, an error message
    pub fn failed(platform: Platform, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::empty(platform)
        }
    }

    /// Whether the collector hit an unexpected failure
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Records produced by a given collection path
    pub fn gpus_of(&self, gpu_type: GpuType) -> impl Iterator<Item = &GpuRecord> {
        self.gpus.iter().filter(move |g| g.gpu_type == gpu_type)
    }
}
