use chrono::{DateTime, Local};

use super::types::BusinessType;

/// Name of the gauge every sample is reported under.
pub const METRIC_NAME: &str = "meter_data";

/// Help text attached to the gauge.
pub const METRIC_HELP: &str = "Meter data from Eloverblik.dk";

/// One reading, labelled and stamped with an absolute instant.
///
/// The sink keys samples on (labels, timestamp), so pushing the same
/// sample twice overwrites rather than duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Upstream quality code (e.g. "A04" measured, "A03" estimated)
    pub quality: String,
    /// Production or consumption, derived from the series' business type code
    pub business_type: BusinessType,
    /// Metering point id (`mRID`)
    pub meter_id: String,
    /// Quantity in kWh
    pub value: f64,
    /// Start of the interval the reading covers
    pub timestamp: DateTime<Local>,
}

impl Sample {
    /// Label pairs in exposition order.
    pub fn labels(&self) -> [(&'static str, String); 3] {
        [
            ("quality", self.quality.clone()),
            ("business_type", self.business_type.to_string()),
            ("meter_id", self.meter_id.clone()),
        ]
    }

    pub fn unix_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}
