//! Error types for the Eloverblik exporter.
//!
//! Each stage of a run (configuration, authorization, data fetch, parsing,
//! token storage, push) has its own error enum. The top-level [`Error`] wraps
//! them so `main` can name the failing stage before exiting non-zero.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data access token could not be obtained
    #[error("authorization error: {0}")]
    Auth(#[from] AuthError),

    /// Meter data request failed
    #[error("meter data API error: {0}")]
    Api(#[from] ApiError),

    /// Response or timestamp could not be parsed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Token file could not be read or written
    #[error("token storage error: {0}")]
    Storage(#[from] StorageError),

    /// Samples could not be handed to the metrics sink
    #[error("metrics sink error: {0}")]
    Sink(#[from] SinkError),
}

impl Error {
    /// Short name of the stage that failed, used in the final diagnostic.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Auth(_) => "auth",
            Error::Api(_) => "fetch",
            Error::Parse(_) => "parse",
            Error::Storage(_) => "token_storage",
            Error::Sink(_) => "push",
        }
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Required configuration value is missing
    #[error("missing required configuration: {0}")]
    Missing(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Errors raised while refreshing the data access token.
#[derive(Error, Debug)]
pub enum AuthError {
    /// HTTP request to the token endpoint failed
    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Token endpoint answered with a non-success status
    #[error("token endpoint returned status {status}")]
    Rejected { status: u16 },

    /// Token endpoint answered 200 but the body had no usable token
    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}

/// Errors raised by the meter data endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("meter data endpoint returned status {status}")]
    Status { status: u16 },

    /// Upstream flagged one of the result documents as failed
    #[error("document {id} failed upstream: {message}")]
    Document { id: String, message: String },
}

/// Parsing errors for responses, timestamps and tokens.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Response body did not have the expected structure
    #[error("unexpected response structure: {0}")]
    Json(String),

    /// Failed to parse date/time
    #[error("failed to parse timestamp from '{text}': {message}")]
    Timestamp { text: String, message: String },

    /// Point position is not a positive integer
    #[error("invalid point position '{text}': {message}")]
    Position { text: String, message: String },

    /// Point quantity is not numeric
    #[error("invalid point quantity '{text}': {message}")]
    Quantity { text: String, message: String },

    /// Token claims could not be decoded
    #[error("undecodable token: {0}")]
    Token(String),
}

/// Token file errors other than the file being absent.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading the token file failed
    #[error("failed to read token file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the token file failed
    #[error("failed to write token file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Metrics sink errors.
#[derive(Error, Debug)]
pub enum SinkError {
    /// HTTP request to the push endpoint failed
    #[error("push request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Push endpoint answered with a non-success status
    #[error("push endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// InfluxDB client error
    #[error("InfluxDB error: {0}")]
    Influx(#[from] influxdb2::RequestError),

    /// Sample could not be converted for the sink
    #[error("invalid sample: {0}")]
    InvalidSample(String),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new missing configuration error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ApiError {
    /// Creates a status error from an HTTP status code.
    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
        }
    }
}

impl ParseError {
    /// Creates a JSON structure error.
    pub fn json(err: impl std::fmt::Display) -> Self {
        Self::Json(err.to_string())
    }

    /// Creates a timestamp parse error.
    pub fn timestamp(text: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Timestamp {
            text: text.into(),
            message: err.to_string(),
        }
    }

    /// Creates a position parse error.
    pub fn position(text: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Position {
            text: text.into(),
            message: err.to_string(),
        }
    }

    /// Creates a quantity parse error.
    pub fn quantity(text: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Quantity {
            text: text.into(),
            message: err.to_string(),
        }
    }
}

impl StorageError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl SinkError {
    /// Creates a status error from HTTP status and response body.
    pub fn status(status: reqwest::StatusCode, body: String) -> Self {
        Self::Status {
            status: status.as_u16(),
            body,
        }
    }
}
