//! Metrics sinks the collected samples are handed to.

mod influxdb;
mod prometheus;

pub use self::influxdb::InfluxSink;
pub use self::prometheus::PrometheusPushSink;

use crate::config::SinkConfig;
use crate::model::MetricSink;

/// Builds the sink selected by configuration.
pub fn from_config(config: &SinkConfig) -> Box<dyn MetricSink> {
    match config {
        SinkConfig::Prometheus(push) => Box::new(PrometheusPushSink::new(push)),
        SinkConfig::Influx(influx) => Box::new(InfluxSink::new(influx.clone())),
    }
}
