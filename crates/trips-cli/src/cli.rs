//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{FixedOffset, NaiveDate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use trips_core::FilterPolicy;

/// Summarize trips from a Takeout location-history export.
///
/// Walks the timeline once, correlating consecutive visit→travel→visit
/// triples, and writes a console report (and, for the bounded policy, a
/// CSV file).
#[derive(Debug, Parser)]
#[command(name = "trips", version, about, long_about = None)]
pub struct Cli {
    /// Path to the location-history JSON file.
    pub file: PathBuf,

    /// Filter policy to apply.
    #[arg(long, value_enum)]
    pub policy: Option<PolicyKind>,

    /// Local start date an activity must match under the date-example policy.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Fixed UTC offset for displayed times (e.g. +02:00).
    ///
    /// Defaults to the local offset sampled at startup; pass an explicit
    /// value for reproducible output.
    #[arg(long)]
    pub utc_offset: Option<FixedOffset>,

    /// Destination for the CSV report (bounded policy only).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Policy selector, shared between the CLI surface and the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Fixed date/type example filter, console output only.
    DateExample,
    /// Activities bounded by two place visits, console + CSV output.
    Bounded,
}

impl PolicyKind {
    /// Builds the walker policy, attaching the filter date where needed.
    #[must_use]
    pub fn into_policy(self, date: NaiveDate) -> FilterPolicy {
        match self {
            Self::DateExample => FilterPolicy::DateTypeExample { date },
            Self::Bounded => FilterPolicy::BoundedTripPairs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_kind_builds_walker_policy() {
        let date = NaiveDate::from_ymd_opt(2022, 2, 4).unwrap();
        assert_eq!(
            PolicyKind::DateExample.into_policy(date),
            FilterPolicy::DateTypeExample { date }
        );
        assert_eq!(
            PolicyKind::Bounded.into_policy(date),
            FilterPolicy::BoundedTripPairs
        );
    }

    #[test]
    fn policy_kind_serde_uses_kebab_case() {
        let json = serde_json::to_string(&PolicyKind::DateExample).unwrap();
        assert_eq!(json, "\"date-example\"");
        let parsed: PolicyKind = serde_json::from_str("\"bounded\"").unwrap();
        assert_eq!(parsed, PolicyKind::Bounded);
    }
}
