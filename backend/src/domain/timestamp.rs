//! Normalisation of creation timestamps to the stored wall-clock format.
//!
//! Stored timestamps are plain `YYYY-MM-DD HH:MM:SS` strings in UTC with no
//! offset. Clients send either ISO-8601 (`2024-03-05T14:30:00.000Z`) or the
//! stored format itself. Anything else is rejected rather than replaced by
//! the current time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// `chrono` format of a stored timestamp.
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const STORED_WITH_FRACTION_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const ISO_WITHOUT_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Timestamp input that could not be normalised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    /// The input was empty after trimming.
    #[error("timestamp must not be empty")]
    Empty,
    /// The input is neither ISO-8601 nor in the stored format.
    #[error("unrecognised timestamp: {input}")]
    Unrecognised {
        /// Raw input as received.
        input: String,
    },
}

/// A second-precision UTC timestamp rendered as `YYYY-MM-DD HH:MM:SS`.
///
/// # Examples
/// ```
/// use grocery_backend::domain::StoredTimestamp;
///
/// let ts = StoredTimestamp::parse("2024-03-05T14:30:00.000Z").expect("iso input");
/// assert_eq!(ts.to_string(), "2024-03-05 14:30:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ToSchema)]
#[schema(value_type = String, example = "2024-03-05 14:30:00")]
pub struct StoredTimestamp(NaiveDateTime);

impl StoredTimestamp {
    /// Current UTC time truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        Self::from_naive(Utc::now().naive_utc())
    }

    /// Wrap a naive UTC date-time, dropping sub-second precision.
    #[must_use]
    pub fn from_naive(value: NaiveDateTime) -> Self {
        Self(value.trunc_subsecs(0))
    }

    /// Underlying naive UTC date-time.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Parse ISO-8601 or stored-format input.
    ///
    /// Input containing a `T` or `Z` marker is read as ISO-8601 and converted
    /// to UTC; a missing offset is taken to mean UTC. Other input must already
    /// be in the stored format, optionally with fractional seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] when the input matches neither shape.
    pub fn parse(input: &str) -> Result<Self, TimestampError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TimestampError::Empty);
        }

        let parsed = if trimmed.contains(['T', 'Z']) {
            parse_iso(trimmed)
        } else {
            NaiveDateTime::parse_from_str(trimmed, STORED_WITH_FRACTION_FORMAT).ok()
        };

        parsed
            .map(Self::from_naive)
            .ok_or_else(|| TimestampError::Unrecognised {
                input: input.to_owned(),
            })
    }
}

fn parse_iso(input: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(input)
        .map(|value| value.with_timezone(&Utc).naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(input, ISO_WITHOUT_OFFSET_FORMAT).ok())
}

/// Normalise a creation timestamp to the stored format.
///
/// # Errors
///
/// Returns [`TimestampError`] when the input cannot be parsed.
///
/// # Examples
/// ```
/// use grocery_backend::domain::normalize_timestamp;
///
/// assert_eq!(
///     normalize_timestamp("2024-03-05 14:30:00").as_deref(),
///     Ok("2024-03-05 14:30:00")
/// );
/// ```
pub fn normalize_timestamp(input: &str) -> Result<String, TimestampError> {
    StoredTimestamp::parse(input).map(|value| value.to_string())
}

impl fmt::Display for StoredTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STORED_TIMESTAMP_FORMAT))
    }
}

impl FromStr for StoredTimestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for StoredTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StoredTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
