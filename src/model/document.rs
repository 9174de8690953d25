//! Shapes of the `gettimeseries` response body.
//!
//! Only the fields the exporter reads are modelled; everything else in the
//! upstream document is ignored by serde.

use crate::error::ParseError;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Top level body: `{ "result": [ ... ] }`.
#[derive(Debug, Deserialize)]
pub struct TimeSeriesResponse {
    pub result: Vec<DocumentResult>,
}

/// One entry of `result`, wrapping a market document for one metering point.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResult {
    #[serde(rename = "MyEnergyData_MarketDocument")]
    pub market_document: Option<MarketDocument>,
    pub success: Option<bool>,
    pub error_text: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarketDocument {
    #[serde(rename = "TimeSeries", default)]
    pub time_series: Vec<TimeSeriesDocument>,
}

/// Readings of one metering point over the queried window.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesDocument {
    #[serde(rename = "mRID")]
    pub meter_id: String,
    #[serde(rename = "businessType")]
    pub business_type: String,
    #[serde(rename = "Period")]
    pub periods: Vec<Period>,
}

/// A contiguous block of readings sharing one start instant.
#[derive(Debug, Clone, Deserialize)]
pub struct Period {
    #[serde(rename = "timeInterval")]
    pub time_interval: TimeInterval,
    #[serde(rename = "Point")]
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeInterval {
    /// ISO-8601 UTC, e.g. `2024-01-01T00:00:00Z`
    pub start: String,
}

/// A single reading within a period.
#[derive(Debug, Clone, Deserialize)]
pub struct Point {
    pub position: NumericText,
    #[serde(rename = "out_Quantity.quantity")]
    pub quantity: NumericText,
    #[serde(rename = "out_Quantity.quality")]
    pub quality: String,
}

impl Point {
    /// 1-based index of the point within its period.
    pub fn position(&self) -> Result<u32, ParseError> {
        let text = self.position.to_string();
        let position = text
            .trim()
            .parse::<u32>()
            .map_err(|e| ParseError::position(&text, e))?;
        if position == 0 {
            return Err(ParseError::position(text, "positions start at 1"));
        }
        Ok(position)
    }

    pub fn quantity(&self) -> Result<f64, ParseError> {
        let text = self.quantity.to_string();
        text.trim()
            .parse::<f64>()
            .map_err(|e| ParseError::quantity(&text, e))
    }
}

/// A numeric field the upstream sends either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericText {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for NumericText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NumericText::Number(n) => write!(f, "{}", n),
            NumericText::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Request body: `{"meteringPoints":{"meteringPoint":["id1","id2"]}}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesRequestBody<'a> {
    pub metering_points: MeteringPointList<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteringPointList<'a> {
    pub metering_point: &'a [String],
}

impl<'a> TimeSeriesRequestBody<'a> {
    pub fn new(metering_points: &'a [String]) -> Self {
        Self {
            metering_points: MeteringPointList {
                metering_point: metering_points,
            },
        }
    }
}
