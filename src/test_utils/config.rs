//! Configuration builders for tests.

use crate::config::{EloverblikConfig, InfluxConfig, PushGatewayConfig};
use crate::model::Resolution;
use std::path::PathBuf;

/// Builder for test Eloverblik configurations.
#[derive(Debug)]
pub struct TestEloverblikConfigBuilder {
    api_url: String,
    refresh_token: String,
    metering_points: Vec<String>,
    resolution: Resolution,
    token_file: PathBuf,
    lookback_days: u32,
}

impl TestEloverblikConfigBuilder {
    pub fn new() -> Self {
        Self {
            api_url: "http://test.local".to_string(),
            refresh_token: "refresh-secret".to_string(),
            metering_points: vec!["M1".to_string()],
            resolution: Resolution::Hour,
            token_file: PathBuf::from("data_access_token.txt"),
            lookback_days: 7,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = refresh_token.into();
        self
    }

    pub fn with_metering_points(mut self, ids: &[&str]) -> Self {
        self.metering_points = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_token_file(mut self, token_file: impl Into<PathBuf>) -> Self {
        self.token_file = token_file.into();
        self
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn build(self) -> EloverblikConfig {
        EloverblikConfig {
            api_url: self.api_url,
            refresh_token: self.refresh_token,
            metering_points: self.metering_points,
            resolution: self.resolution,
            token_file: self.token_file,
            lookback_days: self.lookback_days,
        }
    }
}

/// Builder for test InfluxDB configurations.
#[derive(Debug)]
pub struct TestInfluxConfigBuilder {
    url: String,
    org: String,
    token: String,
    bucket: String,
}

impl TestInfluxConfigBuilder {
    pub fn new() -> Self {
        Self {
            url: "http://localhost:8086".to_string(),
            org: "test-org".to_string(),
            token: "test-token".to_string(),
            bucket: "test-bucket".to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn build(self) -> InfluxConfig {
        InfluxConfig {
            url: self.url,
            org: self.org,
            token: self.token,
            bucket: self.bucket,
        }
    }
}

/// Test InfluxDB configuration pointing at `url`, typically a mock server.
pub fn test_influx_config_with_url(url: impl Into<String>) -> InfluxConfig {
    TestInfluxConfigBuilder::new().with_url(url).build()
}

pub fn test_push_gateway_config_with_url(url: impl Into<String>) -> PushGatewayConfig {
    PushGatewayConfig {
        push_gateway_url: url.into(),
        push_job: "eloverblik-exporter".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eloverblik_config_builder() {
        let config = TestEloverblikConfigBuilder::new()
            .with_api_url("http://mock.local")
            .with_refresh_token("other-secret")
            .with_metering_points(&["A", "B"])
            .with_resolution(Resolution::Quarter)
            .with_token_file("/tmp/token.txt")
            .with_lookback_days(3)
            .build();

        assert_eq!(config.api_url, "http://mock.local");
        assert_eq!(config.refresh_token, "other-secret");
        assert_eq!(config.metering_points, vec!["A", "B"]);
        assert_eq!(config.resolution, Resolution::Quarter);
        assert_eq!(config.token_file, PathBuf::from("/tmp/token.txt"));
        assert_eq!(config.lookback_days, 3);
    }

    #[test]
    fn test_influx_config_builder() {
        let config = TestInfluxConfigBuilder::new()
            .with_url("http://influx.local")
            .with_bucket("my-bucket")
            .build();

        assert_eq!(config.url, "http://influx.local");
        assert_eq!(config.org, "test-org");
        assert_eq!(config.bucket, "my-bucket");
    }

    #[test]
    fn test_convenience_functions() {
        assert_eq!(
            test_influx_config_with_url("http://mock:8086").url,
            "http://mock:8086"
        );
        assert_eq!(
            test_push_gateway_config_with_url("http://vm:8428").push_job,
            "eloverblik-exporter"
        );
    }
}
