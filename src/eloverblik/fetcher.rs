use crate::error::{ApiError, ParseError, Result};
use crate::eloverblik::client::Client;
use crate::model::{Credential, DateWindow, Resolution, TimeSeriesDocument, TimeSeriesResponse};
use std::sync::Arc;

/// Retrieves time series for a set of metering points.
pub struct EnergyDataFetcher {
    client: Arc<Client>,
}

impl EnergyDataFetcher {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Issues one request for all `metering_points` and flattens the result
    /// documents into their time series.
    pub async fn fetch(
        &self,
        credential: &Credential,
        metering_points: &[String],
        window: DateWindow,
        resolution: Resolution,
    ) -> Result<Vec<TimeSeriesDocument>> {
        tracing::info!(
            "Fetching {} data for {} metering point(s) from {} to {}",
            resolution,
            metering_points.len(),
            window.from,
            window.to
        );
        let body = self
            .client
            .fetch_time_series(credential, metering_points, window, resolution)
            .await?;
        tracing::info!("HTTP 200 received from API");
        parse_time_series(&body)
    }
}

/// Parses a `gettimeseries` body down to the time series level.
pub fn parse_time_series(body: &str) -> Result<Vec<TimeSeriesDocument>> {
    let response: TimeSeriesResponse = serde_json::from_str(body).map_err(ParseError::json)?;
    tracing::info!("Number of documents found: {}", response.result.len());

    let mut documents = Vec::new();
    for result in response.result {
        if result.success == Some(false) {
            return Err(ApiError::Document {
                id: result.id.unwrap_or_else(|| "<unknown>".to_string()),
                message: result.error_text.unwrap_or_default(),
            }
            .into());
        }
        let market_document = result
            .market_document
            .ok_or_else(|| ParseError::json("result entry without MyEnergyData_MarketDocument"))?;
        tracing::info!(
            "Number of timeseries found: {}",
            market_document.time_series.len()
        );
        documents.extend(market_document.time_series);
    }
    Ok(documents)
}
