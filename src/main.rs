//! Eloverblik meter data exporter
//!
//! Fetches recent meter readings for a set of Danish metering points from the
//! Eloverblik customer API and pushes them to a metrics store.
//!
//! Each invocation is a single batch run:
//! 1. obtain a valid data access token, refreshing it with the long-lived
//!    refresh token when the cached one is missing or expired
//! 2. request the time series of the trailing lookback window
//! 3. turn every reading into a timestamped `meter_data` sample
//! 4. push all samples in one request
//!
//! Scheduling is left to cron or a Kubernetes CronJob. The process exits
//! non-zero when any stage fails, and nothing is pushed in that case.

mod config;
mod eloverblik;
mod error;
mod exporter;
mod model;
mod sink;

#[cfg(test)]
mod test_utils;

use crate::eloverblik::FileTokenStore;
use crate::error::Error;
use crate::exporter::Exporter;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            let e = Error::from(e);
            tracing_subscriber::fmt().init();
            tracing::error!(stage = e.stage(), "Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(config.app.log_level())
        .init();

    tracing::info!(
        metering_points = config.eloverblik.metering_points.len(),
        resolution = %config.eloverblik.resolution,
        lookback_days = config.eloverblik.lookback_days,
        "Starting export"
    );

    let store = FileTokenStore::new(&config.eloverblik.token_file);
    let sink = sink::from_config(&config.sink);
    let exporter = Exporter::new(&config.eloverblik, Box::new(store), sink);

    match exporter.run().await {
        Ok(count) => {
            tracing::info!("Export finished, {} samples pushed", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(stage = e.stage(), "Export failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
