//! NVIDIA discrete GPU service
//!
//! Detects nvidia-smi and turns its CSV report into `cuda` records.

use crate::domain::{GpuRecord, Platform};
use crate::error::ServiceError;
use crate::parse::nvidia_smi;
use crate::probe::{CommandRunner, Invocation};

/// Default name of the NVIDIA query tool
pub const NVIDIA_SMI: &str = "nvidia-smi";

/// Service for querying NVIDIA GPUs through nvidia-smi
#[derive(Debug, Clone)]
pub struct NvidiaService {
    program: String,
}

impl NvidiaService {
    /// Create a service that invokes `program` (name or path of nvidia-smi)
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Presence check: `which` on POSIX hosts, a bare invocation on Windows
    pub fn probe_invocation(&self, platform: &Platform) -> Invocation {
        if platform.is_posix() {
            Invocation::new("which").arg(&self.program)
        } else {
            Invocation::new(&self.program)
        }
    }

    /// Full telemetry query with PCI bus ordering forced
    pub fn query_invocation(&self) -> Invocation {
        Invocation::new(&self.program)
            .arg(nvidia_smi::query_argument())
            .arg(nvidia_smi::FORMAT_ARGUMENT)
            .env("CUDA_DEVICE_ORDER", "PCI_BUS_ID")
    }

    /// Whether nvidia-smi is available on this host
    pub async fn detect<R: CommandRunner>(&self, runner: &R, platform: &Platform) -> bool {
        let found = runner.succeeds(&self.probe_invocation(platform)).await;
        log::debug!("{} available: {}", self.program, found);
        found
    }

    /// Query every NVIDIA GPU
    pub async fn query<R: CommandRunner>(
        &self,
        runner: &R,
    ) -> Result<Vec<GpuRecord>, ServiceError> {
        let stdout = runner.run(&self.query_invocation()).await?;
        let records = nvidia_smi::parse_output(&stdout);
        log::debug!("nvidia-smi reported {} GPU(s)", records.len());
        Ok(records)
    }
}

impl Default for NvidiaService {
    fn default() -> Self {
        Self::new(NVIDIA_SMI)
    }
}
