//! Report command: one pass over the export file.
//!
//! Loads the document, runs the windowed walk, prints one console line per
//! accepted record, and for the bounded policy writes the CSV artifact
//! (overwriting any previous one, no header row).

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use trips_core::{FilterPolicy, WalkRecord, elapsed, format_instant, parse_document, walk};

/// Runs the report for one export file.
pub fn run(
    file: &Path,
    policy: FilterPolicy,
    display_offset: chrono::FixedOffset,
    output: &Path,
) -> Result<()> {
    tracing::info!(file = %file.display(), "parsing timeline");
    let json = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let entries = parse_document(&json, display_offset)?;
    tracing::info!(entries = entries.len(), "timeline parsed");

    let records = walk(&entries, policy);

    for record in &records {
        println!("{}", console_line(record));
    }

    // Only the bounded policy produces a structured artifact.
    if policy == FilterPolicy::BoundedTripPairs {
        write_csv(&records, output)?;
        tracing::info!(output = %output.display(), trips = records.len(), "report written");
    }

    Ok(())
}

/// Writes one CSV line per trip record, string fields double-quoted.
fn write_csv(records: &[WalkRecord], output: &Path) -> Result<()> {
    let file = fs::File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        if let WalkRecord::Trip(trip) = record {
            writeln!(writer, "{}", csv_line(trip)).context("failed to write trip record")?;
        }
    }
    writer.flush().context("failed to flush report")?;
    Ok(())
}

/// Console rendering for one accepted record: subject, time range,
/// duration breakdown, distance where applicable.
fn console_line(record: &WalkRecord) -> String {
    match record {
        WalkRecord::Activity(activity) => format!(
            "Activity: {} from {} to {} ({}) {} m",
            activity.activity_type,
            format_instant(activity.start),
            format_instant(activity.end),
            elapsed(activity.start, activity.end),
            activity.distance_meters,
        ),
        WalkRecord::VisitEcho(visit) => format!(
            "Visit: {} from {} to {} ({})",
            visit.label(),
            format_instant(visit.start),
            format_instant(visit.end),
            elapsed(visit.start, visit.end),
        ),
        WalkRecord::Trip(trip) => format!(
            "Trip: {} -> {} from {} to {} ({} km)",
            trip.from_location,
            trip.to_location,
            format_instant(trip.start),
            format_instant(trip.end),
            trip.distance_km,
        ),
    }
}

/// CSV rendering for one trip. String fields are double-quoted with any
/// embedded commas replaced by spaces, so no escaping is needed.
fn csv_line(trip: &trips_core::Trip) -> String {
    format!(
        "\"{}\",\"{}\",{},{},{}",
        csv_field(&trip.from_location),
        csv_field(&trip.to_location),
        format_instant(trip.start),
        format_instant(trip.end),
        trip.distance_km,
    )
}

fn csv_field(value: &str) -> String {
    value.replace(',', " ")
}
