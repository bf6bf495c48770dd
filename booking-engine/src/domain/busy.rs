//! Busy intervals and the per-day neighbor index.
//!
//! A busy interval is a pre-existing booking blocking part of a day,
//! optionally carrying the location where the owner will be. The engine
//! receives a read-only snapshot per computation and never mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A pre-existing booking blocking part of a day.
///
/// Invariant: `start < end`. A missing location means the booking happens at
/// the owner's default start address for travel purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    /// Start of the booking (UTC).
    pub start: DateTime<Utc>,

    /// End of the booking (UTC).
    pub end: DateTime<Utc>,

    /// Where the booking takes place, if known.
    pub location: Option<String>,
}

impl BusyInterval {
    /// Create a busy interval, enforcing `start < end`.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: Option<String>,
    ) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidInterval("start must be before end"));
        }
        Ok(Self {
            start,
            end,
            location,
        })
    }

    /// Half-open overlap test against a candidate block.
    pub fn overlaps(&self, block_start: DateTime<Utc>, block_end: DateTime<Utc>) -> bool {
        block_start < self.end && self.start < block_end
    }
}

/// Sorted, read-only index of one day's busy intervals.
///
/// Supports the neighbor queries the travel policy resolver needs: the
/// interval immediately preceding a candidate (where the owner travels from)
/// and the one immediately following (where they travel to next).
#[derive(Debug, Clone, Default)]
pub struct DaySchedule {
    /// Intervals sorted by start.
    intervals: Vec<BusyInterval>,
}

impl DaySchedule {
    /// Build an index from the day's intervals.
    pub fn new(mut intervals: Vec<BusyInterval>) -> Self {
        intervals.sort_by_key(|i| i.start);
        Self { intervals }
    }

    /// The interval with the greatest `end <= instant`.
    ///
    /// Intervals may overlap each other, so the latest end is not
    /// necessarily on the interval with the latest start.
    pub fn preceding(&self, instant: DateTime<Utc>) -> Option<&BusyInterval> {
        self.intervals
            .iter()
            .filter(|i| i.end <= instant)
            .max_by_key(|i| i.end)
    }

    /// The interval with the smallest `start >= instant`.
    pub fn following(&self, instant: DateTime<Utc>) -> Option<&BusyInterval> {
        self.intervals.iter().find(|i| i.start >= instant)
    }

    /// The first interval overlapping the half-open block, if any.
    pub fn conflict(
        &self,
        block_start: DateTime<Utc>,
        block_end: DateTime<Utc>,
    ) -> Option<&BusyInterval> {
        self.intervals
            .iter()
            .find(|i| i.overlaps(block_start, block_end))
    }

    /// Iterate the intervals in start order.
    pub fn iter(&self) -> impl Iterator<Item = &BusyInterval> {
        self.intervals.iter()
    }

    /// Returns the number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns true if the day has no bookings.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, h, m, 0).unwrap()
    }

    fn busy(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> BusyInterval {
        BusyInterval::new(at(start_h, start_m), at(end_h, end_m), None).unwrap()
    }

    #[test]
    fn rejects_inverted_interval() {
        assert!(BusyInterval::new(at(10, 0), at(9, 0), None).is_err());
        assert!(BusyInterval::new(at(10, 0), at(10, 0), None).is_err());
        assert!(BusyInterval::new(at(9, 0), at(10, 0), None).is_ok());
    }

    #[test]
    fn half_open_overlap() {
        let b = busy(10, 0, 11, 0);

        // Touching at either end is not an overlap
        assert!(!b.overlaps(at(9, 0), at(10, 0)));
        assert!(!b.overlaps(at(11, 0), at(12, 0)));

        assert!(b.overlaps(at(9, 0), at(10, 1)));
        assert!(b.overlaps(at(10, 30), at(10, 45)));
        assert!(b.overlaps(at(9, 0), at(12, 0)));
    }

    #[test]
    fn preceding_picks_latest_end() {
        let schedule = DaySchedule::new(vec![busy(9, 0, 9, 30), busy(10, 0, 10, 45)]);

        assert!(schedule.preceding(at(9, 0)).is_none());
        assert_eq!(schedule.preceding(at(9, 45)).unwrap().end, at(9, 30));
        assert_eq!(schedule.preceding(at(11, 0)).unwrap().end, at(10, 45));
    }

    #[test]
    fn preceding_with_overlapping_intervals() {
        // Second interval starts later but ends earlier.
        let schedule = DaySchedule::new(vec![busy(9, 0, 11, 0), busy(9, 30, 10, 0)]);
        assert_eq!(schedule.preceding(at(12, 0)).unwrap().end, at(11, 0));
    }

    #[test]
    fn following_picks_earliest_start() {
        let schedule = DaySchedule::new(vec![busy(14, 0, 15, 0), busy(10, 0, 10, 30)]);

        assert_eq!(schedule.following(at(9, 0)).unwrap().start, at(10, 0));
        assert_eq!(schedule.following(at(10, 30)).unwrap().start, at(14, 0));
        assert!(schedule.following(at(15, 30)).is_none());
    }

    #[test]
    fn conflict_finds_overlap() {
        let schedule = DaySchedule::new(vec![busy(10, 0, 10, 30)]);

        assert!(schedule.conflict(at(9, 0), at(10, 0)).is_none());
        assert!(schedule.conflict(at(10, 15), at(11, 0)).is_some());
    }

    #[test]
    fn empty_schedule() {
        let schedule = DaySchedule::new(vec![]);
        assert!(schedule.is_empty());
        assert!(schedule.preceding(at(12, 0)).is_none());
        assert!(schedule.following(at(12, 0)).is_none());
        assert!(schedule.conflict(at(9, 0), at(17, 0)).is_none());
    }
}
