//! Weekly availability rules.
//!
//! A rule describes the working hours for one day of the week. The weekly
//! schedule is consulted per calendar day: a day with no matching rule is
//! entirely unavailable.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::time::WallTime;

/// Working hours for one day of the week.
///
/// `day_of_week` is Sunday-based (0 = Sunday .. 6 = Saturday), matching the
/// wire format the booking frontend produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRule {
    /// Day of week, 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,

    /// Start of the work window (wall clock, policy timezone).
    pub start_time: WallTime,

    /// End of the work window (wall clock, policy timezone).
    pub end_time: WallTime,
}

impl AvailabilityRule {
    /// Create a new rule, validating the day-of-week range.
    pub fn new(day_of_week: u8, start_time: WallTime, end_time: WallTime) -> Result<Self, DomainError> {
        if day_of_week > 6 {
            return Err(DomainError::InvalidRule("day of week must be 0-6"));
        }
        Ok(Self {
            day_of_week,
            start_time,
            end_time,
        })
    }

    /// Whether the rule describes a non-empty work window.
    ///
    /// An inverted or empty window is a configuration error; the affected
    /// day is skipped rather than failing the whole computation.
    pub fn is_well_formed(&self) -> bool {
        self.start_time < self.end_time
    }

    /// Whether this rule applies to the given weekday.
    pub fn matches(&self, weekday: Weekday) -> bool {
        u32::from(self.day_of_week) == weekday.num_days_from_sunday()
    }
}

/// An owner's recurring weekly work schedule.
///
/// When several rules match the same weekday, the first one wins, matching
/// the behavior of the booking platform's stored schedules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    rules: Vec<AvailabilityRule>,
}

impl WeeklySchedule {
    /// Create a schedule from a list of rules, validating each.
    pub fn new(rules: Vec<AvailabilityRule>) -> Result<Self, DomainError> {
        for rule in &rules {
            if rule.day_of_week > 6 {
                return Err(DomainError::InvalidRule("day of week must be 0-6"));
            }
        }
        Ok(Self { rules })
    }

    /// Look up the rule for a weekday. First match wins.
    pub fn rule_for(&self, weekday: Weekday) -> Option<&AvailabilityRule> {
        self.rules.iter().find(|r| r.matches(weekday))
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the schedule has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
