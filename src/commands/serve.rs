//! Serve command implementation
//!
//! Runs the HTTP server for the monitoring dashboard.

use crate::config::ServerConfig;
use crate::error::Result;
use crate::probe::CommandRunner;
use crate::server;
use crate::services::Collector;

use std::sync::Arc;

/// Execute the serve command
pub async fn run_serve<R: CommandRunner + 'static>(
    config: &ServerConfig,
    collector: Collector<R>,
) -> Result<()> {
    log::info!(
        "Collecting for platform '{}', listening on {}",
        collector.platform(),
        config.address()
    );

    server::serve(config, Arc::new(collector)).await
}
