use crate::error::ConfigError;
use crate::model::Resolution;
use serde_derive::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(|err| ConfigError::env_parse(err))
}

fn default_api_url() -> String {
    "https://api.eloverblik.dk/customerapi/api".to_string()
}

fn default_token_file() -> PathBuf {
    PathBuf::from("data_access_token.txt")
}

fn default_lookback_days() -> u32 {
    7
}

#[derive(Deserialize, Debug, Clone)]
pub struct EloverblikConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub refresh_token: String,
    pub metering_points: Vec<String>,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

impl EloverblikConfig {
    /// Trims ids, drops empty entries and checks the remaining values.
    fn validated(mut self) -> Result<Self, ConfigError> {
        self.metering_points = self
            .metering_points
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if self.metering_points.is_empty() {
            return Err(ConfigError::missing("METERING_POINTS"));
        }
        if self.refresh_token.trim().is_empty() {
            return Err(ConfigError::missing("REFRESH_TOKEN"));
        }
        if self.lookback_days == 0 {
            return Err(ConfigError::invalid("LOOKBACK_DAYS", "must be at least 1"));
        }
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        Ok(self)
    }
}

pub(crate) fn load_eloverblik_config() -> Result<EloverblikConfig, ConfigError> {
    envy::from_env::<EloverblikConfig>()
        .map_err(|err| match err {
            envy::Error::MissingValue(field) => ConfigError::missing(field.to_uppercase()),
            other => ConfigError::env_parse(other),
        })?
        .validated()
}

#[derive(Deserialize, Debug, Clone, Copy, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Prometheus,
    Influxdb,
}

#[derive(Deserialize, Debug)]
struct SinkSelection {
    #[serde(default)]
    sink: SinkKind,
}

fn default_push_gateway_url() -> String {
    "http://victoria-metrics:8428/api/v1/import/prometheus".to_string()
}

fn default_push_job() -> String {
    "eloverblik-exporter".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct PushGatewayConfig {
    #[serde(default = "default_push_gateway_url")]
    pub push_gateway_url: String,
    #[serde(default = "default_push_job")]
    pub push_job: String,
}

pub(crate) fn load_push_gateway_config() -> Result<PushGatewayConfig, ConfigError> {
    envy::from_env::<PushGatewayConfig>().map_err(|err| ConfigError::env_parse(err))
}

#[derive(Deserialize, Debug, Clone)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

pub fn load_influx_config() -> Result<InfluxConfig, ConfigError> {
    envy::prefixed("INFLUXDB_")
        .from_env::<InfluxConfig>()
        .map_err(|err| match err {
            envy::Error::MissingValue(field) => {
                ConfigError::missing(format!("INFLUXDB_{}", field.to_uppercase()))
            }
            other => ConfigError::env_parse(other),
        })
}

/// Where the collected samples go.
#[derive(Debug, Clone)]
pub enum SinkConfig {
    Prometheus(PushGatewayConfig),
    Influx(InfluxConfig),
}

pub(crate) fn load_sink_config() -> Result<SinkConfig, ConfigError> {
    let selection = envy::from_env::<SinkSelection>()
        .map_err(|err| ConfigError::invalid("SINK", err.to_string()))?;
    match selection.sink {
        SinkKind::Prometheus => Ok(SinkConfig::Prometheus(load_push_gateway_config()?)),
        SinkKind::Influxdb => Ok(SinkConfig::Influx(load_influx_config()?)),
    }
}

/// Everything a run needs, read once at start-up.
#[derive(Debug)]
pub struct Config {
    pub app: AppConfig,
    pub eloverblik: EloverblikConfig,
    pub sink: SinkConfig,
}

pub fn load_config() -> Result<Config, ConfigError> {
    Ok(Config {
        app: load_app_config()?,
        eloverblik: load_eloverblik_config()?,
        sink: load_sink_config()?,
    })
}
