use crate::eloverblik::timestamp;
use crate::error::ParseError;
use crate::model::{BusinessType, Resolution, Sample, TimeSeriesDocument};

/// Flattens time series documents into labelled, timestamped samples.
pub struct SampleCollector {
    resolution: Resolution,
}

impl SampleCollector {
    /// `resolution` must be the one the documents were requested with.
    pub fn new(resolution: Resolution) -> Self {
        Self { resolution }
    }

    /// Walks document → period → point in original order.
    ///
    /// The first malformed period start, position or quantity aborts the
    /// whole collection; no partial result is returned.
    pub fn collect(&self, documents: &[TimeSeriesDocument]) -> Result<Vec<Sample>, ParseError> {
        let mut samples = Vec::new();

        for document in documents {
            let business_type = BusinessType::from_code(&document.business_type);

            for period in &document.periods {
                let start = timestamp::parse_period_start(&period.time_interval.start)?;
                tracing::info!(
                    "Parsing meter id {} for date {}",
                    document.meter_id,
                    period.time_interval.start
                );

                for point in &period.points {
                    let position = point.position()?;
                    let sample = Sample {
                        quality: point.quality.clone(),
                        business_type,
                        meter_id: document.meter_id.clone(),
                        value: point.quantity()?,
                        timestamp: timestamp::resolve(start, position, self.resolution)?,
                    };
                    tracing::debug!(
                        quality = %sample.quality,
                        business_type = %sample.business_type,
                        position,
                        quantity = sample.value,
                        timestamp = sample.unix_millis(),
                        "Adding sample"
                    );
                    samples.push(sample);
                }
            }
        }

        Ok(samples)
    }
}
