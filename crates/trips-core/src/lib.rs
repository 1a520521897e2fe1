//! Core timeline reconstruction logic for the trips tool.
//!
//! This crate contains the fundamental types and logic for:
//! - Entry classification: decoding Takeout timeline objects into a sum type
//! - Timestamp normalization: fixed-offset local display time and durations
//! - The windowed walk: correlating visit→travel→visit triples under a policy

pub mod entry;
pub mod time;
pub mod walk;

pub use entry::{ActivitySegment, ActivityType, ParseError, PlaceVisit, TimelineEntry, parse_document};
pub use time::{DurationParts, TimestampFormatError, elapsed, format_instant, parse_timestamp};
pub use walk::{FilterPolicy, HOME_LABEL, Neighbor, Trip, WalkRecord, resolve_label, walk};
