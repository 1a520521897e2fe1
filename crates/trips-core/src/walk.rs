//! Windowed walk over the classified timeline.
//!
//! The walker slides a three-entry window (previous, current, next) over the
//! ordered entry list and applies one of two filter policies. Every entry is
//! walked; the final one simply has no successor, so only rules that do not
//! need one (the date-example selection and the visit echo) can accept it.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::entry::{ActivitySegment, ActivityType, PlaceVisit, TimelineEntry};

/// Label standing in for the position before the first entry.
pub const HOME_LABEL: &str = "Assuming home";

/// Which inclusion rule the walk applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Passenger-vehicle activities on one fixed local date, with each
    /// immediately following place visit echoed after an accepted activity.
    DateTypeExample { date: NaiveDate },
    /// Passenger-vehicle activities bounded by a place visit on both sides,
    /// reported as origin→destination trips.
    BoundedTripPairs,
}

/// The entry one step behind the window, or the synthetic home position
/// when the window sits at the start of the list.
#[derive(Debug, Clone, Copy)]
pub enum Neighbor<'a> {
    Home,
    Entry(&'a TimelineEntry),
}

/// Resolves the location label of a neighbor, if it has one.
///
/// The sentinel always resolves to [`HOME_LABEL`]; a place visit resolves to
/// its cleaned address; an activity has no label.
#[must_use]
pub fn resolve_label(neighbor: Neighbor<'_>) -> Option<String> {
    match neighbor {
        Neighbor::Home => Some(HOME_LABEL.to_string()),
        Neighbor::Entry(TimelineEntry::Visit(visit)) => Some(visit.label()),
        Neighbor::Entry(TimelineEntry::Activity(_)) => None,
    }
}

/// One accepted visit→travel→visit correlation.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub from_location: String,
    pub to_location: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub distance_km: f64,
}

/// One record accepted by the walk.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkRecord {
    /// An activity selected by [`FilterPolicy::DateTypeExample`].
    Activity(ActivitySegment),
    /// A visit echoed because the entry directly before it was accepted.
    VisitEcho(PlaceVisit),
    /// A bounded trip selected by [`FilterPolicy::BoundedTripPairs`].
    Trip(Trip),
}

/// Walks the entry list and returns every record the policy accepts, in
/// document order. Read-only over the entries; each window position yields
/// at most one record.
#[must_use]
pub fn walk(entries: &[TimelineEntry], policy: FilterPolicy) -> Vec<WalkRecord> {
    let mut records = Vec::new();
    let mut prev_accepted = false;
    for i in 0..entries.len() {
        let prev = if i == 0 {
            Neighbor::Home
        } else {
            Neighbor::Entry(&entries[i - 1])
        };
        prev_accepted = step(
            policy,
            prev,
            &entries[i],
            entries.get(i + 1),
            prev_accepted,
            &mut records,
        );
    }
    records
}

/// Applies the policy at one window position. Returns whether this step
/// accepted an activity, which the next step receives as its fold state.
fn step(
    policy: FilterPolicy,
    prev: Neighbor<'_>,
    current: &TimelineEntry,
    next: Option<&TimelineEntry>,
    prev_accepted: bool,
    records: &mut Vec<WalkRecord>,
) -> bool {
    match (policy, current) {
        (FilterPolicy::DateTypeExample { date }, TimelineEntry::Activity(activity)) => {
            let selected = activity.activity_type == ActivityType::InPassengerVehicle
                && activity.start.date_naive() == date;
            if selected {
                records.push(WalkRecord::Activity(activity.clone()));
            }
            selected
        }
        (FilterPolicy::DateTypeExample { .. }, TimelineEntry::Visit(visit)) => {
            if prev_accepted {
                records.push(WalkRecord::VisitEcho(visit.clone()));
            }
            false
        }
        (FilterPolicy::BoundedTripPairs, TimelineEntry::Activity(activity)) => {
            if activity.activity_type == ActivityType::InPassengerVehicle {
                if let (Some(from), Some(to)) = (
                    resolve_label(prev),
                    next.and_then(|entry| resolve_label(Neighbor::Entry(entry))),
                ) {
                    records.push(WalkRecord::Trip(Trip {
                        from_location: from,
                        to_location: to,
                        start: activity.start,
                        end: activity.end,
                        distance_km: activity.distance_meters / 1000.0,
                    }));
                }
            }
            false
        }
        (FilterPolicy::BoundedTripPairs, TimelineEntry::Visit(_)) => false,
    }
}
