use crate::config::InfluxConfig;
use crate::error::SinkError;
use crate::model::{MetricSink, Sample, METRIC_NAME};
use async_trait::async_trait;
use futures::prelude::stream;
use influxdb2::models::DataPoint;

/// Writes samples to an InfluxDB2 bucket, one point per sample.
///
/// InfluxDB overwrites points with identical measurement, tag set and
/// timestamp, which keeps the overlapping lookback window idempotent.
pub struct InfluxSink {
    client: influxdb2::Client,
    bucket: String,
}

impl InfluxSink {
    pub(crate) fn new(config: InfluxConfig) -> Self {
        let client = influxdb2::Client::new(config.url, config.org, config.token);
        Self {
            client,
            bucket: config.bucket,
        }
    }
}

fn to_point(sample: &Sample) -> Result<DataPoint, SinkError> {
    let timestamp = sample
        .timestamp
        .timestamp_nanos_opt()
        .ok_or_else(|| SinkError::InvalidSample("Timestamp overflow".to_string()))?;

    DataPoint::builder(METRIC_NAME)
        .tag("quality", sample.quality.clone())
        .tag("business_type", sample.business_type.to_string())
        .tag("meter_id", sample.meter_id.clone())
        .field("value", sample.value)
        .timestamp(timestamp)
        .build()
        .map_err(|e| SinkError::InvalidSample(format!("Failed to build DataPoint: {}", e)))
}

#[async_trait]
impl MetricSink for InfluxSink {
    async fn push(&self, samples: &[Sample]) -> Result<(), SinkError> {
        if samples.is_empty() {
            tracing::info!("No samples to write to InfluxDB");
            return Ok(());
        }
        let points = samples.iter().map(to_point).collect::<Result<Vec<_>, _>>()?;
        Ok(self
            .client
            .write(self.bucket.as_str(), stream::iter(points))
            .await?)
    }
}
