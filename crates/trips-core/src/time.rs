//! Timestamp normalization and duration breakdowns.
//!
//! Takeout timestamps are ISO 8601 strings with a UTC offset (numeric or
//! `Z`) and an optional sub-second fraction. Every parsed instant is shifted into a single
//! display offset so the whole report reads in one local time.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// Error for timestamp strings matching neither accepted pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized timestamp format: {0}")]
pub struct TimestampFormatError(String);

// %#z accepts the `Z` suffix the export emits as well as numeric offsets.
const SUBSECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%#z";
const WHOLE_SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%#z";

/// Format used for report and CSV timestamp fields.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Parses an ISO 8601 timestamp and shifts it into the display offset.
///
/// Tries the sub-second form first, then falls back to whole seconds. The
/// offset is an explicit input so a run produces the same output regardless
/// of where or when it executes.
pub fn parse_timestamp(
    value: &str,
    display_offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, TimestampFormatError> {
    DateTime::parse_from_str(value, SUBSECOND_FORMAT)
        .or_else(|_| DateTime::parse_from_str(value, WHOLE_SECOND_FORMAT))
        .map(|instant| instant.with_timezone(&display_offset))
        .map_err(|_| TimestampFormatError(value.to_string()))
}

/// Renders an instant as `DD/MM/YYYY HH:MM:SS`.
#[must_use]
pub fn format_instant(instant: DateTime<FixedOffset>) -> String {
    instant.format(DISPLAY_FORMAT).to_string()
}

/// Whole hours/minutes/seconds between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationParts {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl fmt::Display for DurationParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

/// Breaks the span between two instants into whole hours, minutes and
/// seconds via truncating division. A reversed range clamps to zero.
#[must_use]
pub fn elapsed(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> DurationParts {
    let total = (end - start).num_seconds().max(0);
    DurationParts {
        hours: total / 3600,
        minutes: total % 3600 / 60,
        seconds: total % 60,
    }
}
