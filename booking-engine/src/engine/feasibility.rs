//! Candidate feasibility checking.
//!
//! A candidate is judged on its total block: appointment window plus buffer
//! plus whichever travel legs the policy counts. The total block is compared
//! against every busy interval of the day; comparing only the appointment
//! window (as some older schedulers did) lets buffers and commutes silently
//! collide with bookings.

use chrono::{DateTime, Duration, Utc};

use crate::domain::BusyInterval;

use super::day::DayContext;

/// The full span a candidate occupies on the owner's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TotalBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TotalBlock {
    /// Build the total block around an appointment window.
    ///
    /// `travel_to`/`travel_from` are the *counted* travel legs; pass `None`
    /// for legs the policy absorbs or that are unknown.
    pub(crate) fn around(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        buffer: Duration,
        travel_to: Option<Duration>,
        travel_from: Option<Duration>,
    ) -> Self {
        Self {
            start: start - travel_to.unwrap_or_else(Duration::zero),
            end: end + buffer + travel_from.unwrap_or_else(Duration::zero),
        }
    }
}

/// Outcome of checking one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict<'a> {
    /// No overlap; the candidate can be offered.
    Feasible,

    /// The total block overlaps a busy interval.
    Conflict(&'a BusyInterval),

    /// The appointment window leaves the day's work window.
    OutsideWindow,
}

/// Check a candidate's appointment window and total block against the day.
pub(crate) fn check<'a>(
    ctx: &'a DayContext,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    block: TotalBlock,
) -> Verdict<'a> {
    if start < ctx.day_start || end > ctx.day_end {
        return Verdict::OutsideWindow;
    }

    match ctx.busy.conflict(block.start, block.end) {
        Some(busy) => Verdict::Conflict(busy),
        None => Verdict::Feasible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AvailabilityRule, WallTime, WeeklySchedule};
    use crate::engine::policy::SchedulingPolicy;
    use chrono::{NaiveDate, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, h, m, 0).unwrap()
    }

    fn ctx_with_busy(busy: Vec<BusyInterval>) -> DayContext {
        let rules = (0..7)
            .map(|d| {
                AvailabilityRule::new(
                    d,
                    WallTime::parse("09:00").unwrap(),
                    WallTime::parse("17:00").unwrap(),
                )
                .unwrap()
            })
            .collect();
        let schedule = WeeklySchedule::new(rules).unwrap();
        let policy = SchedulingPolicy::default();
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        DayContext::build(date, &schedule, &policy, &busy).unwrap()
    }

    #[test]
    fn block_includes_buffer_and_counted_travel() {
        let block = TotalBlock::around(
            at(10, 0),
            at(10, 30),
            Duration::minutes(15),
            Some(Duration::minutes(30)),
            Some(Duration::minutes(20)),
        );
        assert_eq!(block.start, at(9, 30));
        assert_eq!(block.end, at(11, 5));
    }

    #[test]
    fn absorbed_travel_is_excluded() {
        let block = TotalBlock::around(at(10, 0), at(10, 30), Duration::minutes(15), None, None);
        assert_eq!(block.start, at(10, 0));
        assert_eq!(block.end, at(10, 45));
    }

    #[test]
    fn detects_conflict_via_total_block() {
        let busy = BusyInterval::new(at(11, 0), at(11, 30), None).unwrap();
        let ctx = ctx_with_busy(vec![busy]);

        // Appointment 10:00-10:30 is clear of the booking, but its buffered
        // block 10:00-11:05 is not.
        let block = TotalBlock::around(at(10, 0), at(10, 30), Duration::minutes(35), None, None);
        assert!(matches!(
            check(&ctx, at(10, 0), at(10, 30), block),
            Verdict::Conflict(_)
        ));
    }

    #[test]
    fn rejects_candidates_outside_window() {
        let ctx = ctx_with_busy(vec![]);

        let block = TotalBlock::around(at(8, 0), at(8, 30), Duration::zero(), None, None);
        assert_eq!(check(&ctx, at(8, 0), at(8, 30), block), Verdict::OutsideWindow);

        let block = TotalBlock::around(at(16, 45), at(17, 15), Duration::zero(), None, None);
        assert_eq!(
            check(&ctx, at(16, 45), at(17, 15), block),
            Verdict::OutsideWindow
        );
    }

    #[test]
    fn buffer_may_spill_past_day_end() {
        let ctx = ctx_with_busy(vec![]);

        // Appointment ends exactly at the window edge; the buffer after it
        // is idle time and does not disqualify the slot.
        let block = TotalBlock::around(at(16, 30), at(17, 0), Duration::minutes(30), None, None);
        assert_eq!(check(&ctx, at(16, 30), at(17, 0), block), Verdict::Feasible);
    }
}
