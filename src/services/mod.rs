//! Service layer for GPU telemetry
//!
//! Services encapsulate the collection logic for each vendor path and the
//! collector that combines them into a snapshot.

pub mod apple_service;
pub mod collector;
pub mod nvidia_service;

pub use apple_service::AppleSiliconService;
pub use collector::Collector;
pub use nvidia_service::NvidiaService;
