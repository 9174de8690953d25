use chrono::{Duration, NaiveDate};
use serde_derive::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Sampling granularity requested from the meter data API.
///
/// The variant name is sent verbatim as the last path segment of the
/// time series request, and each variant carries the spacing between two
/// consecutive point positions.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Resolution {
    /// One reading per hour
    #[default]
    Hour,
    /// One reading per 15 minutes
    Quarter,
}

impl Resolution {
    /// Time between two consecutive positions within a period.
    pub fn step(&self) -> Duration {
        match self {
            Resolution::Hour => Duration::hours(1),
            Resolution::Quarter => Duration::minutes(15),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Resolution::Hour => write!(f, "Hour"),
            Resolution::Quarter => write!(f, "Quarter"),
        }
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        match raw.to_ascii_lowercase().as_str() {
            "hour" => Ok(Resolution::Hour),
            "quarter" => Ok(Resolution::Quarter),
            _ => Err(format!("unsupported resolution '{}', expected Hour or Quarter", raw)),
        }
    }
}

impl TryFrom<String> for Resolution {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Whether a time series measures energy produced or consumed.
///
/// Upstream code `A01` is production; every other code falls back to
/// consumption, including codes that are not consumption at all.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum BusinessType {
    Production,
    Consumption,
}

impl BusinessType {
    pub const PRODUCTION_CODE: &'static str = "A01";

    pub fn from_code(code: &str) -> Self {
        if code == Self::PRODUCTION_CODE {
            BusinessType::Production
        } else {
            BusinessType::Consumption
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BusinessType::Production => write!(f, "production"),
            BusinessType::Consumption => write!(f, "consumption"),
        }
    }
}

/// Inclusive calendar-day window sent as `{from}/{to}` in the request path.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Window ending at `today` and starting `days` days earlier.
    ///
    /// Consecutive daily runs overlap on purpose: the sink overwrites samples
    /// with an identical label set and timestamp.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        Self {
            from: today - Duration::days(i64::from(days)),
            to: today,
        }
    }
}

/// Data access token as returned by the token endpoint.
///
/// The raw value is kept out of `Debug` output so it never ends up in logs.
#[derive(Clone, Eq, PartialEq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Credential(<{} bytes>)", self.0.len())
    }
}
