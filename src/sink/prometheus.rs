//! Push of samples in Prometheus text exposition format.
//!
//! The body carries one gauge family with an explicit millisecond timestamp
//! per sample and is `PUT` to `{url}/metrics/job/{job}`, which both a
//! Pushgateway and VictoriaMetrics' `/api/v1/import/prometheus` accept.

use crate::config::PushGatewayConfig;
use crate::error::SinkError;
use crate::model::{MetricSink, Sample, METRIC_HELP, METRIC_NAME};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Escape a label value: backslash, double quote and line feed.
fn escape_label_value(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{:?}", value)
    }
}

fn write_sample_line(sample: &Sample, out: &mut String) {
    out.push_str(METRIC_NAME);
    out.push('{');
    for (i, (key, value)) in sample.labels().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(key);
        out.push_str("=\"");
        escape_label_value(value, out);
        out.push('"');
    }
    out.push_str("} ");
    out.push_str(&format_value(sample.value));
    out.push(' ');
    out.push_str(&sample.unix_millis().to_string());
    out.push('\n');
}

/// Renders the `meter_data` gauge family for `samples`.
pub fn encode(samples: &[Sample]) -> String {
    let mut out = String::new();
    out.push_str(&format!("# HELP {} {}\n", METRIC_NAME, METRIC_HELP));
    out.push_str(&format!("# TYPE {} gauge\n", METRIC_NAME));
    for sample in samples {
        write_sample_line(sample, &mut out);
    }
    out
}

pub struct PrometheusPushSink {
    http_client: HttpClient,
    url: String,
}

impl PrometheusPushSink {
    pub fn new(config: &PushGatewayConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            url: format!(
                "{}/metrics/job/{}",
                config.push_gateway_url.trim_end_matches('/'),
                config.push_job
            ),
        }
    }
}

#[async_trait]
impl MetricSink for PrometheusPushSink {
    async fn push(&self, samples: &[Sample]) -> Result<(), SinkError> {
        let response = self
            .http_client
            .put(&self.url)
            .header(CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)
            .body(encode(samples))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SinkError::status(status, body))
        }
    }
}
