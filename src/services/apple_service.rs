//! Apple Silicon integrated GPU service
//!
//! macOS has no GPU query tool, so the record is assembled from sysctl,
//! vm_stat and system_profiler. Memory is unified, which makes system
//! memory the GPU memory. Utilization, temperature, power, clocks and fan
//! are not exposed by any of these tools and stay unknown.

use crate::domain::{GpuRecord, GpuType, Metric};
use crate::error::ServiceError;
use crate::parse::system_profiler::{self, DISPLAYS_DATA_TYPE};
use crate::parse::sysctl::{self, CPU_BRAND_KEY, MEMSIZE_KEY};
use crate::parse::vm_stat::VmStat;
use crate::parse::bytes_to_gb;
use crate::probe::{CommandRunner, Invocation};

/// Display name of the integrated GPU record
pub const APPLE_GPU_NAME: &str = "Apple Silicon GPU";

/// `sysctl -n machdep.cpu.brand_string`
pub fn brand_invocation() -> Invocation {
    Invocation::new("sysctl").arg("-n").arg(CPU_BRAND_KEY)
}

/// `sysctl -n hw.memsize`
pub fn memsize_invocation() -> Invocation {
    Invocation::new("sysctl").arg("-n").arg(MEMSIZE_KEY)
}

/// `vm_stat`
pub fn vm_stat_invocation() -> Invocation {
    Invocation::new("vm_stat")
}

/// `system_profiler SPDisplaysDataType`
pub fn core_count_invocation() -> Invocation {
    Invocation::new("system_profiler").arg(DISPLAYS_DATA_TYPE)
}

/// Memory utilization percentage, known only when both operands are
pub fn memory_utilization(used_mb: Metric<u64>, total_gb: Metric<u64>) -> Metric<u32> {
    match (used_mb, total_gb) {
        (Metric::Known(used), Metric::Known(total)) if total > 0 => {
            Metric::Known((used as f64 / (total as f64 * 1024.0) * 100.0).round() as u32)
        }
        _ => Metric::Unknown,
    }
}

/// Service for detecting an Apple Silicon GPU
#[derive(Debug, Clone, Default)]
pub struct AppleSiliconService;

impl AppleSiliconService {
    /// Create a new Apple Silicon service
    pub fn new() -> Self {
        Self
    }

    /// Build the `mps` record, or `None` when the CPU is not Apple Silicon
    ///
    /// Only the physical memory query is mandatory once the chip is
    /// recognised; vm_stat and system_profiler failures degrade the
    /// affected fields instead of dropping the record.
    pub async fn detect<R: CommandRunner>(
        &self,
        runner: &R,
    ) -> Result<Option<GpuRecord>, ServiceError> {
        let brand = match runner.run(&brand_invocation()).await {
            Ok(stdout) => sysctl::parse_brand(&stdout).to_string(),
            Err(e) => {
                log::debug!("CPU brand query failed: {}", e);
                return Ok(None);
            }
        };

        if !sysctl::is_apple_silicon(&brand) {
            log::debug!("CPU '{}' is not Apple Silicon", brand);
            return Ok(None);
        }

        let memsize = sysctl::parse_memsize(&runner.run(&memsize_invocation()).await?)?;
        let total_gb = bytes_to_gb(memsize);

        let (used_mb, free_mb) = match runner.run(&vm_stat_invocation()).await {
            Ok(stdout) => {
                let stat = VmStat::parse(&stdout);
                (Metric::Known(stat.used_mb()), Metric::Known(stat.free_mb()))
            }
            Err(e) => {
                log::warn!("vm_stat unavailable, memory usage unknown: {}", e);
                (Metric::Unknown, Metric::Unknown)
            }
        };

        let cores = match self.core_count(runner).await {
            Ok(cores) => Some(cores),
            Err(e) => {
                log::warn!("GPU core count unavailable: {}", e);
                None
            }
        };

        let mut record = GpuRecord::new(0, APPLE_GPU_NAME, GpuType::Mps)
            .with_model(brand)
            .with_cores(cores);
        record.memory.total = Metric::Known(total_gb * 1024);
        record.memory.used = used_mb;
        record.memory.free = free_mb;
        record.utilization.memory = memory_utilization(used_mb, Metric::Known(total_gb));

        Ok(Some(record))
    }

    async fn core_count<R: CommandRunner>(&self, runner: &R) -> Result<u32, ServiceError> {
        let stdout = runner.run(&core_count_invocation()).await?;
        Ok(system_profiler::parse_core_count(&stdout)?)
    }
}
