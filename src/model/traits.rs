use crate::error::SinkError;
use async_trait::async_trait;

use super::metrics::Sample;

/// Destination for collected samples.
///
/// Implementors must treat a sample whose labels and timestamp were already
/// pushed as an overwrite, since every run re-submits the whole lookback
/// window. A push either lands completely or fails; callers never retry.
#[async_trait]
pub trait MetricSink: Send + Sync {
    async fn push(&self, samples: &[Sample]) -> Result<(), SinkError>;
}
