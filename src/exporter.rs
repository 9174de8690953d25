//! One export run: token → fetch → transform → push.

use crate::config::EloverblikConfig;
use crate::eloverblik::{Client, EnergyDataFetcher, SampleCollector, TokenManager, TokenStore};
use crate::error::Result;
use crate::model::{DateWindow, MetricSink};
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Wires the pipeline stages together for a single run.
///
/// Any stage failure ends the run before the sink is touched, so a push
/// only ever carries the complete sample set.
pub struct Exporter<'a> {
    config: &'a EloverblikConfig,
    token_manager: TokenManager,
    fetcher: EnergyDataFetcher,
    collector: SampleCollector,
    sink: Box<dyn MetricSink>,
}

impl<'a> Exporter<'a> {
    pub fn new(
        config: &'a EloverblikConfig,
        store: Box<dyn TokenStore>,
        sink: Box<dyn MetricSink>,
    ) -> Self {
        let client = Arc::new(Client::new(config.api_url.as_str()));
        Self {
            config,
            token_manager: TokenManager::new(
                Arc::clone(&client),
                store,
                config.refresh_token.as_str(),
            ),
            fetcher: EnergyDataFetcher::new(client),
            collector: SampleCollector::new(config.resolution),
            sink,
        }
    }

    pub async fn run(&self) -> Result<usize> {
        self.run_at(Local::now()).await
    }

    /// Runs with `now` as the reference for token expiry and the date window.
    pub async fn run_at(&self, now: DateTime<Local>) -> Result<usize> {
        let credential = self
            .token_manager
            .valid_credential_at(now.to_utc())
            .await?;

        let window = DateWindow::trailing(now.date_naive(), self.config.lookback_days);
        let documents = self
            .fetcher
            .fetch(
                &credential,
                &self.config.metering_points,
                window,
                self.config.resolution,
            )
            .await?;

        let samples = self.collector.collect(&documents)?;
        tracing::info!("Pushing {} samples", samples.len());
        self.sink.push(&samples).await?;
        tracing::info!("Samples pushed");
        Ok(samples.len())
    }
}
