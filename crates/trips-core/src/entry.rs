//! Timeline entry model and classification.
//!
//! A Takeout location-history document carries a `timelineObjects` array in
//! which every element is a single-key object: either an `activitySegment`
//! (travel between two points) or a `placeVisit` (a stay at an address).
//! Classification happens exactly once, at parse time, producing the
//! [`TimelineEntry`] sum type the walker consumes.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::{self, TimestampFormatError};

/// Errors raised while turning the raw document into timeline entries.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document itself is not the expected JSON shape.
    #[error("malformed timeline document")]
    Json(#[from] serde_json::Error),

    /// A duration field matched neither accepted timestamp pattern.
    #[error(transparent)]
    Timestamp(#[from] TimestampFormatError),

    /// A timeline object carried a key other than the two known kinds.
    #[error("unrecognized timeline entry kind: {key}")]
    UnknownEntryKind { key: String },

    /// A timeline object carried no key at all.
    #[error("timeline object has no entry")]
    EmptyEntry,

    /// A timeline object carried both entry kinds at once.
    #[error("timeline object has more than one entry")]
    AmbiguousEntry,
}

/// Mode-of-transport tag on an activity segment.
///
/// Only [`ActivityType::InPassengerVehicle`] is treated specially by the
/// filter policies; everything else passes through unselected. Unlisted
/// vocabulary is preserved verbatim in [`ActivityType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    InPassengerVehicle,
    Walking,
    Running,
    Cycling,
    Motorcycling,
    InBus,
    InTrain,
    InTram,
    Flying,
    Still,
    UnknownActivityType,
    Other(String),
}

impl ActivityType {
    /// String representation as it appears in the export.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InPassengerVehicle => "IN_PASSENGER_VEHICLE",
            Self::Walking => "WALKING",
            Self::Running => "RUNNING",
            Self::Cycling => "CYCLING",
            Self::Motorcycling => "MOTORCYCLING",
            Self::InBus => "IN_BUS",
            Self::InTrain => "IN_TRAIN",
            Self::InTram => "IN_TRAM",
            Self::Flying => "FLYING",
            Self::Still => "STILL",
            Self::UnknownActivityType => "UNKNOWN_ACTIVITY_TYPE",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for ActivityType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "IN_PASSENGER_VEHICLE" => Self::InPassengerVehicle,
            "WALKING" => Self::Walking,
            "RUNNING" => Self::Running,
            "CYCLING" => Self::Cycling,
            "MOTORCYCLING" => Self::Motorcycling,
            "IN_BUS" => Self::InBus,
            "IN_TRAIN" => Self::InTrain,
            "IN_TRAM" => Self::InTram,
            "FLYING" => Self::Flying,
            "STILL" => Self::Still,
            "UNKNOWN_ACTIVITY_TYPE" => Self::UnknownActivityType,
            _ => Self::Other(s),
        }
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        value.as_str().to_owned()
    }
}

/// Travel between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySegment {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub activity_type: ActivityType,
    pub distance_meters: f64,
}

/// A stay at a location with an address.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceVisit {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub address: String,
}

impl PlaceVisit {
    /// Address flattened to a single line: embedded newlines become spaces.
    /// Commas are kept; only the CSV sink replaces them.
    #[must_use]
    pub fn label(&self) -> String {
        self.address.replace('\n', " ")
    }
}

/// One classified timeline record. Exactly one variant per source object.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEntry {
    Activity(ActivitySegment),
    Visit(PlaceVisit),
}

// === Wire shapes ===

#[derive(Debug, Deserialize)]
struct WireDocument {
    #[serde(rename = "timelineObjects")]
    timeline_objects: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDuration {
    start_timestamp: String,
    end_timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireActivity {
    duration: WireDuration,
    activity_type: ActivityType,
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct WireVisit {
    duration: WireDuration,
    location: WireLocation,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    address: String,
}

/// Parses a full location-history document into an ordered entry list.
///
/// All timestamps are normalized into `display_offset`. The first
/// unrecognized object key aborts the parse; nothing after it is produced.
pub fn parse_document(
    json: &str,
    display_offset: FixedOffset,
) -> Result<Vec<TimelineEntry>, ParseError> {
    let document: WireDocument = serde_json::from_str(json)?;
    let entries = document
        .timeline_objects
        .into_iter()
        .map(|object| classify(object, display_offset))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(entries = entries.len(), "timeline document classified");
    Ok(entries)
}

const ACTIVITY_KEY: &str = "activitySegment";
const VISIT_KEY: &str = "placeVisit";

/// Decodes one single-key timeline object into its entry variant.
fn classify(
    object: serde_json::Map<String, serde_json::Value>,
    display_offset: FixedOffset,
) -> Result<TimelineEntry, ParseError> {
    // Name the offending key, not whichever one the map yields first.
    if let Some(key) = object
        .keys()
        .find(|key| key.as_str() != ACTIVITY_KEY && key.as_str() != VISIT_KEY)
    {
        return Err(ParseError::UnknownEntryKind { key: key.clone() });
    }

    let mut fields = object.into_iter();
    let Some((key, value)) = fields.next() else {
        return Err(ParseError::EmptyEntry);
    };
    if fields.next().is_some() {
        return Err(ParseError::AmbiguousEntry);
    }

    match key.as_str() {
        ACTIVITY_KEY => {
            let wire: WireActivity = serde_json::from_value(value)?;
            Ok(TimelineEntry::Activity(ActivitySegment {
                start: time::parse_timestamp(&wire.duration.start_timestamp, display_offset)?,
                end: time::parse_timestamp(&wire.duration.end_timestamp, display_offset)?,
                activity_type: wire.activity_type,
                distance_meters: wire.distance,
            }))
        }
        VISIT_KEY => {
            let wire: WireVisit = serde_json::from_value(value)?;
            Ok(TimelineEntry::Visit(PlaceVisit {
                start: time::parse_timestamp(&wire.duration.start_timestamp, display_offset)?,
                end: time::parse_timestamp(&wire.duration.end_timestamp, display_offset)?,
                address: wire.location.address,
            }))
        }
        _ => Err(ParseError::UnknownEntryKind { key }),
    }
}
