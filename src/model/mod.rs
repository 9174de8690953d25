//! Model definitions for Eloverblik meter data and exported samples.
//!
//! This module provides the upstream document shapes, the domain types the
//! pipeline works with, and the trait every metrics sink implements.

pub mod document;
pub mod metrics;
pub mod traits;
pub mod types;

// Re-export commonly used items at the module level
pub use document::{TimeSeriesDocument, TimeSeriesRequestBody, TimeSeriesResponse};
pub use metrics::{Sample, METRIC_HELP, METRIC_NAME};
pub use traits::MetricSink;
pub use types::{BusinessType, Credential, DateWindow, Resolution};
