//! External tool abstraction layer
//!
//! Provides trait-based abstractions over process spawning for testability.

pub mod system;
pub mod traits;

pub use system::{SystemRunner, DEFAULT_COMMAND_TIMEOUT};
pub use traits::{CommandRunner, Invocation};
