//! Identifier types for ledger entities
//!
//! A match record is identified by the instant it was recorded at. The
//! instant is kept at millisecond precision so that its RFC 3339 wire form
//! (`2024-05-01T12:00:00.123Z`) round-trips exactly.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Creation instant of a match record, doubling as its unique identifier
///
/// Ordering follows the underlying instant, which is not necessarily the
/// ledger order; the ledger order is the insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordedAt(DateTime<Utc>);

impl RecordedAt {
    /// Create from an instant, truncating to millisecond precision
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.trunc_subsecs(3))
    }

    /// Create from milliseconds since the Unix epoch
    pub fn from_timestamp_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// Milliseconds since the Unix epoch
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The identifier one millisecond later, used to disambiguate collisions
    pub fn next_millisecond(&self) -> Self {
        Self(self.0 + Duration::milliseconds(1))
    }
}

impl fmt::Display for RecordedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Error returned when a `recordedAt` value is not an RFC 3339 instant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid recordedAt '{value}': expected an RFC 3339 timestamp")]
pub struct ParseRecordedAtError {
    pub value: String,
}

impl FromStr for RecordedAt {
    type Err = ParseRecordedAtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s.trim())
            .map(|at| Self::from_datetime(at.with_timezone(&Utc)))
            .map_err(|_| ParseRecordedAtError {
                value: s.to_string(),
            })
    }
}

impl Serialize for RecordedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
