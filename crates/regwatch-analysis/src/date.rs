//! Day-granularity parsing of the free-form `date` field.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use thiserror::Error;

/// Why a record's `date` field could not be used for date aggregation.
///
/// Local to the field: the record itself is always kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("date field is missing")]
    Missing,

    #[error("date field is a {0}, not a string")]
    NotAString(&'static str),

    #[error("unrecognized date: {0:?}")]
    Unrecognized(String),
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a JSON value as a calendar date, discarding any time of day.
///
/// Timezone-aware timestamps keep the calendar date in their own offset.
///
/// # Errors
///
/// Returns [`DateParseError`] for `null`, non-string values, and strings in
/// none of the accepted layouts.
pub fn parse_date(value: &Value) -> Result<NaiveDate, DateParseError> {
    match value {
        Value::Null => Err(DateParseError::Missing),
        Value::String(s) => parse_date_str(s),
        Value::Bool(_) => Err(DateParseError::NotAString("boolean")),
        Value::Number(_) => Err(DateParseError::NotAString("number")),
        Value::Array(_) => Err(DateParseError::NotAString("array")),
        Value::Object(_) => Err(DateParseError::NotAString("object")),
    }
}

fn parse_date_str(raw: &str) -> Result<NaiveDate, DateParseError> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.date_naive());
    }
    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| DateParseError::Unrecognized(raw.to_string()))
}
