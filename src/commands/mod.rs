//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod list;
pub mod serve;
pub mod snapshot;

pub use list::run_list;
pub use serve::run_serve;
pub use snapshot::run_snapshot;
