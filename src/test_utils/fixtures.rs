//! Test fixtures: access tokens and `gettimeseries` response bodies.

/// Unsigned JWT-shaped tokens.
pub mod tokens {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use chrono::{DateTime, Utc};

    const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

    /// Token whose payload is exactly `payload`.
    pub fn jwt_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(HEADER),
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode("signature")
        )
    }

    /// Token with an integer `exp` claim at `expires_at`.
    pub fn jwt_expiring_at(expires_at: DateTime<Utc>) -> String {
        jwt_with_payload(&format!(
            r#"{{"sub":"customer","exp":{}}}"#,
            expires_at.timestamp()
        ))
    }
}

/// Builders for time series documents in the upstream JSON shape.
pub mod documents {
    use crate::model::{TimeSeriesDocument, TimeSeriesResponse};
    use serde_json::{json, Value};

    #[derive(Debug, Clone)]
    pub struct PeriodFixture {
        start: String,
        points: Vec<Value>,
    }

    impl PeriodFixture {
        pub fn new(start: &str) -> Self {
            Self {
                start: start.to_string(),
                points: Vec::new(),
            }
        }

        /// Appends a point; position and quantity are sent as strings, as
        /// the upstream does.
        pub fn point(mut self, position: u32, quantity: &str, quality: &str) -> Self {
            self.points.push(json!({
                "position": position.to_string(),
                "out_Quantity.quantity": quantity,
                "out_Quantity.quality": quality,
            }));
            self
        }

        fn to_json(&self) -> Value {
            json!({
                "resolution": "PT1H",
                "timeInterval": { "start": self.start, "end": self.start },
                "Point": self.points,
            })
        }
    }

    #[derive(Debug, Clone)]
    pub struct TimeSeriesFixture {
        meter_id: String,
        business_type: String,
        periods: Vec<PeriodFixture>,
    }

    impl TimeSeriesFixture {
        pub fn new(meter_id: &str, business_type: &str) -> Self {
            Self {
                meter_id: meter_id.to_string(),
                business_type: business_type.to_string(),
                periods: Vec::new(),
            }
        }

        pub fn period(mut self, period: PeriodFixture) -> Self {
            self.periods.push(period);
            self
        }

        fn to_json(&self) -> Value {
            json!({
                "mRID": self.meter_id,
                "businessType": self.business_type,
                "curveType": "A01",
                "measurement_Unit.name": "KWH",
                "Period": self.periods.iter().map(PeriodFixture::to_json).collect::<Vec<_>>(),
            })
        }

        pub fn build(&self) -> TimeSeriesDocument {
            serde_json::from_value(self.to_json()).unwrap()
        }
    }

    /// Full response body with one successful `result` entry per inner vec.
    pub fn response_body(results: &[Vec<TimeSeriesFixture>]) -> String {
        let result: Vec<Value> = results
            .iter()
            .map(|series| {
                json!({
                    "MyEnergyData_MarketDocument": {
                        "mRID": "document",
                        "TimeSeries": series.iter().map(TimeSeriesFixture::to_json).collect::<Vec<_>>(),
                    },
                    "success": true,
                    "errorCode": 10000,
                    "errorText": "NoError",
                    "id": series.first().map(|s| s.meter_id.clone()),
                })
            })
            .collect();
        json!({ "result": result }).to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_response_body_is_readable() {
            let body = response_body(&[vec![TimeSeriesFixture::new("M1", "A01")
                .period(PeriodFixture::new("2024-01-01T00:00:00Z").point(1, "0.5", "A04"))]]);
            let response: TimeSeriesResponse = serde_json::from_str(&body).unwrap();

            assert_eq!(response.result.len(), 1);
            assert_eq!(response.result[0].success, Some(true));
        }

        #[test]
        fn test_build_document() {
            let document = TimeSeriesFixture::new("M1", "E17")
                .period(PeriodFixture::new("2024-01-01T00:00:00Z").point(2, "0.5", "A04"))
                .build();

            assert_eq!(document.meter_id, "M1");
            assert_eq!(document.periods[0].points[0].position().unwrap(), 2);
            assert_eq!(document.periods[0].points[0].quantity().unwrap(), 0.5);
        }
    }
}
