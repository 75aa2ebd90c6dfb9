//! Opaque instants carried by captured telemetry
//!
//! Browser sources report epoch milliseconds as JSON numbers while the test
//! runner reports wall-clock instants as text. Both are kept verbatim so a
//! persisted record reproduces its input, and only converted to an instant
//! when two of them need to be compared. Anything else (`null`, a missing
//! field, an object) is kept as [`Timestamp::Invalid`] and never matches an
//! instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch, possibly fractional
    Millis(serde_json::Number),
    /// RFC 3339 instant, or epoch milliseconds written as text
    Text(String),
    /// Any other JSON value
    Invalid(Value),
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Invalid(Value::Null)
    }
}

impl Timestamp {
    pub fn from_millis(ms: i64) -> Self {
        Timestamp::Millis(serde_json::Number::from(ms))
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Timestamp::Text(instant.to_rfc3339())
    }

    /// Convert to an instant, `None` when the value does not denote one
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Millis(number) => number.as_f64().and_then(instant_from_millis),
            Timestamp::Text(text) => {
                let text = text.trim();
                DateTime::parse_from_rfc3339(text)
                    .map(|instant| instant.with_timezone(&Utc))
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(instant_from_millis))
            }
            Timestamp::Invalid(_) => None,
        }
    }
}

fn instant_from_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    let micros = (ms * 1000.0).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Timestamp::from_millis(ms)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Timestamp::from_datetime(instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Millis(number) => write!(f, "{number}"),
            Timestamp::Text(text) => write!(f, "{text}"),
            Timestamp::Invalid(value) => write!(f, "{value}"),
        }
    }
}
