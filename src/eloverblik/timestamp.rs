//! Reconstruction of absolute reading times from period-relative positions.

use crate::error::ParseError;
use crate::model::Resolution;
use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Format of `timeInterval.start` in the upstream documents.
const PERIOD_START_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parses a period start such as `2024-01-01T00:00:00Z` as UTC.
pub fn parse_period_start(text: &str) -> Result<DateTime<Utc>, ParseError> {
    NaiveDateTime::parse_from_str(text, PERIOD_START_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| ParseError::timestamp(text, e))
}

/// Instant of the reading at `position` (1-based) within a period.
///
/// The period start is moved into the local timezone first and the offset
/// `(position - 1) * step` is added afterwards, as an absolute duration.
/// A position whose offset leaves chrono's range is a [`ParseError`].
pub fn resolve(
    period_start: DateTime<Utc>,
    position: u32,
    resolution: Resolution,
) -> Result<DateTime<Local>, ParseError> {
    let start = period_start.with_timezone(&Local);
    i32::try_from(position.saturating_sub(1))
        .ok()
        .and_then(|index| resolution.step().checked_mul(index))
        .and_then(|offset| start.checked_add_signed(offset))
        .ok_or_else(|| ParseError::position(position.to_string(), "offset out of range"))
}
