//! Serve command implementation.

use anyhow::Result;
use tracing::info;

use crate::config::{CliOverrides, ServeConfig};
use crate::server;

/// Execute the serve command. Blocks until the server stops.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the address cannot be bound.
pub fn execute(overrides: &CliOverrides) -> Result<()> {
    let config = ServeConfig::resolve(overrides)?;
    info!(host = %config.host, port = config.port, service = %config.service, "Starting health service");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(&config))
}
