//! Yard allocation engine process.
//!
//! Reads one JSON request per line on stdin and writes one JSON response per
//! line on stdout. Logs go to the telemetry subscriber.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::info;
use yard_allocation::ApiHandler;
use yard_runtime::{build_service, shutdown_on, RequestLoop, RuntimeConfig};
use yard_telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Invalid configuration")?;
    config
        .allocation
        .validate()
        .context("Invalid allocation configuration")?;

    let _telemetry =
        init_telemetry(config.telemetry.clone()).context("Failed to initialize telemetry")?;

    let (service, summary) = build_service(&config).context("Failed to seed topology")?;
    info!(
        yards = summary.yards,
        blocks = summary.blocks,
        plans = summary.plans,
        cache_enabled = config.allocation.cache.enabled,
        "[yard] allocation engine ready"
    );

    let shutdown_rx = shutdown_on(tokio::signal::ctrl_c());

    let request_loop = RequestLoop::new(ApiHandler::new(Arc::new(service)));
    request_loop
        .run(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            shutdown_rx,
        )
        .await
        .context("Request loop failed")?;

    info!("Shutdown complete");
    Ok(())
}
