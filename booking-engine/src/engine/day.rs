//! Per-day computation context.
//!
//! Each planned day gets an explicit immutable context: the resolved work
//! window as UTC instants and the day's busy intervals. Helpers receive this
//! value instead of closing over loop state, so no cross-day state can leak.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::domain::{BusyInterval, DaySchedule, WeeklySchedule};

use super::policy::SchedulingPolicy;

/// Immutable context for walking one calendar day.
#[derive(Debug, Clone)]
pub(crate) struct DayContext {
    /// The local calendar date in the policy timezone.
    pub date: NaiveDate,

    /// Start of the work window (UTC).
    pub day_start: DateTime<Utc>,

    /// End of the work window (UTC).
    pub day_end: DateTime<Utc>,

    /// The day's busy intervals, indexed for neighbor queries.
    pub busy: DaySchedule,
}

impl DayContext {
    /// Build the context for a local calendar date.
    ///
    /// Returns `None` when the day is unavailable or misconfigured: no rule
    /// for the weekday, an inverted work window, or rule times that do not
    /// resolve to valid local instants (DST gaps). Such days are skipped
    /// rather than failing the computation.
    pub(crate) fn build(
        date: NaiveDate,
        schedule: &WeeklySchedule,
        policy: &SchedulingPolicy,
        busy: &[BusyInterval],
    ) -> Option<Self> {
        let rule = schedule.rule_for(date.weekday())?;
        if !rule.is_well_formed() {
            return None;
        }

        let day_start = local_instant(date, rule.start_time.to_naive_time(), policy)?;
        let day_end = local_instant(date, rule.end_time.to_naive_time(), policy)?;
        if day_end <= day_start {
            // A DST transition can invert an otherwise well-formed window.
            return None;
        }

        let tz = policy.timezone;
        let daily: Vec<BusyInterval> = busy
            .iter()
            .filter(|b| b.start.with_timezone(&tz).date_naive() == date)
            .cloned()
            .collect();

        Some(Self {
            date,
            day_start,
            day_end,
            busy: DaySchedule::new(daily),
        })
    }
}

/// Resolve a wall-clock time on a local date to a UTC instant.
///
/// Ambiguous local times (clocks going back) take the earlier mapping;
/// nonexistent ones (clocks going forward) resolve to `None`.
fn local_instant(
    date: NaiveDate,
    time: chrono::NaiveTime,
    policy: &SchedulingPolicy,
) -> Option<DateTime<Utc>> {
    policy
        .timezone
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
