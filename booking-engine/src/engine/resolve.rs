//! Travel policy resolver.
//!
//! Decides, per candidate, where the owner travels from, whether each travel
//! leg counts against the schedule, and the earliest feasible appointment
//! start. In FIXED mode travel is absorbed inside the work window; in
//! FLEXIBLE mode it is inserted between neighbors and, when configured, at
//! the edges of the day.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{BusyInterval, round_up_to_grid};

use super::policy::{SchedulingPolicy, WorkdayMode};

/// Whether the commute to the candidate counts against the schedule.
///
/// With a preceding booking the owner must travel from wherever it ended;
/// without one, the day-start flag decides.
pub(crate) fn counts_travel_to(policy: &SchedulingPolicy, has_prev: bool) -> bool {
    policy.workday_mode == WorkdayMode::Flexible
        && (has_prev || policy.include_travel_at_day_start)
}

/// Whether the commute away from the candidate counts against the schedule.
pub(crate) fn counts_travel_from(policy: &SchedulingPolicy, has_next: bool) -> bool {
    policy.workday_mode == WorkdayMode::Flexible
        && (has_next || policy.include_travel_at_day_end)
}

/// Where the owner travels from to reach the candidate.
pub(crate) fn origin_for<'a>(
    prev: Option<&'a BusyInterval>,
    policy: &'a SchedulingPolicy,
) -> &'a str {
    prev.and_then(|p| p.location.as_deref())
        .unwrap_or(&policy.default_start_address)
}

/// Where the owner travels to after the candidate.
pub(crate) fn next_destination_for<'a>(
    next: Option<&'a BusyInterval>,
    policy: &'a SchedulingPolicy,
) -> &'a str {
    next.and_then(|n| n.location.as_deref())
        .unwrap_or(&policy.default_start_address)
}

/// The earliest feasible appointment start at or after the cursor, rounded
/// up to the grid.
///
/// The rounded start never regresses before the cursor: a stale value would
/// otherwise let the walker re-emit a candidate it already passed.
pub(crate) fn earliest_start(
    policy: &SchedulingPolicy,
    cursor: DateTime<Utc>,
    prev: Option<&BusyInterval>,
    travel_to: Duration,
) -> DateTime<Utc> {
    let mut base = match prev {
        Some(p) => cursor.max(p.end + policy.buffer()),
        None => cursor,
    };

    if counts_travel_to(policy, prev.is_some()) {
        base += travel_to;
    }

    let start = round_up_to_grid(base);
    if start < cursor {
        round_up_to_grid(cursor)
    } else {
        start
    }
}
