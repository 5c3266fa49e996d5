//! Domain models for gputel
//!
//! Telemetry records, the snapshot that carries them, and the
//! known-or-unknown metric wrapper.

pub mod gpu;
pub mod metric;
pub mod platform;
pub mod snapshot;

pub use gpu::{Clocks, Fan, GpuRecord, GpuType, MemoryUsage, Power, Utilization};
pub use metric::{Metric, UNKNOWN_MARKER};
pub use platform::Platform;
pub use snapshot::TelemetrySnapshot;
