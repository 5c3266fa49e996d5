//! List command implementation
//!
//! Lists all detected GPUs.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, GpuList};
use crate::error::{AppError, Result};
use crate::probe::CommandRunner;
use crate::services::Collector;

/// Execute the list command
pub async fn run_list<R: CommandRunner>(
    collector: &Collector<R>,
    format: OutputFormat,
) -> Result<()> {
    let snapshot = collector.collect().await;

    if let Some(error) = snapshot.error {
        return Err(AppError::Collection(error));
    }

    print_output(&GpuList::from(&snapshot), format)?;

    Ok(())
}
