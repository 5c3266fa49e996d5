//! Telemetry collector
//!
//! Orchestrates one collection pass: platform, NVIDIA path, Apple Silicon
//! path, aggregation. `collect` never fails; anything not handled by the
//! individual services lands in the snapshot's `error` field.

use crate::config::CollectorConfig;
use crate::domain::{Platform, TelemetrySnapshot};
use crate::error::ServiceError;
use crate::probe::{CommandRunner, SystemRunner};
use crate::services::{AppleSiliconService, NvidiaService};

/// Stateless GPU telemetry collector
pub struct Collector<R: CommandRunner> {
    runner: R,
    platform: Platform,
    nvidia: NvidiaService,
    apple: AppleSiliconService,
}

impl Collector<SystemRunner> {
    /// Collector for the running host, spawning real processes
    pub fn from_config(config: &CollectorConfig) -> Self {
        Collector::new(SystemRunner::new(config.command_timeout()), Platform::current())
            .with_nvidia_smi(config.nvidia_smi.clone())
    }
}

impl<R: CommandRunner> Collector<R> {
    /// Create a collector for `platform` using `runner` for every tool call
    pub fn new(runner: R, platform: Platform) -> Self {
        Self {
            runner,
            platform,
            nvidia: NvidiaService::default(),
            apple: AppleSiliconService::new(),
        }
    }

    /// Override the nvidia-smi program name or path
    pub fn with_nvidia_smi(mut self, program: impl Into<String>) -> Self {
        self.nvidia = NvidiaService::new(program);
        self
    }

    /// Platform this collector reports for
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// The command runner in use
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Take a fresh telemetry snapshot
    pub async fn collect(&self) -> TelemetrySnapshot {
        match self.try_collect().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("GPU telemetry collection failed: {}", e);
                TelemetrySnapshot::failed(
                    self.platform.clone(),
                    format!("Failed to collect GPU telemetry: {}", e),
                )
            }
        }
    }

    async fn try_collect(&self) -> Result<TelemetrySnapshot, ServiceError> {
        let mut snapshot = TelemetrySnapshot::empty(self.platform.clone());

        snapshot.has_nvidia_smi = self.nvidia.detect(&self.runner, &self.platform).await;
        if snapshot.has_nvidia_smi {
            snapshot.gpus.extend(self.nvidia.query(&self.runner).await?);
        }

        if self.platform.supports_apple_silicon() {
            if let Some(record) = self.apple.detect(&self.runner).await? {
                snapshot.has_mps = true;
                snapshot.gpus.push(record);
            }
        }

        log::debug!(
            "Collected {} GPU record(s) on {} (nvidia-smi: {}, mps: {})",
            snapshot.gpus.len(),
            snapshot.platform,
            snapshot.has_nvidia_smi,
            snapshot.has_mps
        );

        Ok(snapshot)
    }
}
