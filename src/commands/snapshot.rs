//! Snapshot command implementation
//!
//! Collects one telemetry snapshot and prints it.

use crate::cli::args::OutputFormat;
use crate::cli::output::print_output;
use crate::error::{AppError, Result};
use crate::probe::CommandRunner;
use crate::services::Collector;

/// Execute the snapshot command
///
/// The snapshot is printed even when collection failed, so JSON consumers
/// always get the same body the HTTP endpoint would return.
pub async fn run_snapshot<R: CommandRunner>(
    collector: &Collector<R>,
    format: OutputFormat,
) -> Result<()> {
    let snapshot = collector.collect().await;

    print_output(&snapshot, format)?;

    match snapshot.error {
        Some(error) => Err(AppError::Collection(error)),
        None => Ok(()),
    }
}
