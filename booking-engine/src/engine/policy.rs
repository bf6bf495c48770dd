//! Scheduling policy for slot computation.

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::compute::EngineError;

/// How travel time interacts with the nominal work window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkdayMode {
    /// The work window is fixed; travel is absorbed inside it.
    Fixed,

    /// Travel shifts appointments within the window: commutes are inserted
    /// before the first and after the last appointment when configured, and
    /// always between appointments at different locations.
    Flexible,
}

/// Policy parameters for one availability computation.
///
/// Immutable per run. The planning window fields mirror the booking link
/// record: slots are computed for `planning_window_days` days starting
/// `planning_offset_days` after the reference instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingPolicy {
    /// Appointment duration (minutes).
    pub duration_minutes: i64,

    /// Mandatory idle time after an appointment (minutes).
    pub buffer_minutes: i64,

    /// Where the owner starts and ends their day.
    pub default_start_address: String,

    /// Display timezone; also the timezone the weekly rules are read in.
    pub timezone: Tz,

    /// How travel interacts with working hours.
    pub workday_mode: WorkdayMode,

    /// Whether the commute to the day's first appointment counts.
    pub include_travel_at_day_start: bool,

    /// Whether the commute home after the day's last appointment counts.
    pub include_travel_at_day_end: bool,

    /// Candidates requiring more travel than this are dropped (minutes).
    pub max_travel_minutes: Option<i64>,

    /// Days between the reference instant and the first planned day.
    #[serde(default = "default_offset_days")]
    pub planning_offset_days: i64,

    /// Length of the planning window in days.
    #[serde(default = "default_window_days")]
    pub planning_window_days: i64,
}

fn default_offset_days() -> i64 {
    1
}

fn default_window_days() -> i64 {
    7
}

impl SchedulingPolicy {
    /// Returns the appointment duration as a `Duration`.
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }

    /// Returns the buffer as a `Duration`.
    pub fn buffer(&self) -> Duration {
        Duration::minutes(self.buffer_minutes)
    }

    /// Returns the maximum travel time as a `Duration`, if set.
    pub fn max_travel(&self) -> Option<Duration> {
        self.max_travel_minutes.map(Duration::minutes)
    }

    /// Validate the policy. This is the engine's only fatal error source;
    /// everything downstream degrades instead of failing.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.duration_minutes <= 0 {
            return Err(EngineError::InvalidPolicy("duration must be positive"));
        }
        if self.buffer_minutes < 0 {
            return Err(EngineError::InvalidPolicy("buffer must not be negative"));
        }
        if self.planning_offset_days < 0 {
            return Err(EngineError::InvalidPolicy(
                "planning offset must not be negative",
            ));
        }
        if self.planning_window_days <= 0 {
            return Err(EngineError::InvalidPolicy(
                "planning window must be positive",
            ));
        }
        if let Some(max) = self.max_travel_minutes {
            if max < 0 {
                return Err(EngineError::InvalidPolicy(
                    "max travel must not be negative",
                ));
            }
        }
        Ok(())
    }
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            duration_minutes: 30,
            buffer_minutes: 0,
            default_start_address: String::new(),
            timezone: chrono_tz::UTC,
            workday_mode: WorkdayMode::Fixed,
            include_travel_at_day_start: false,
            include_travel_at_day_end: false,
            max_travel_minutes: None,
            planning_offset_days: default_offset_days(),
            planning_window_days: default_window_days(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy() {
        let policy = SchedulingPolicy::default();

        assert_eq!(policy.duration_minutes, 30);
        assert_eq!(policy.buffer_minutes, 0);
        assert_eq!(policy.workday_mode, WorkdayMode::Fixed);
        assert_eq!(policy.planning_offset_days, 1);
        assert_eq!(policy.planning_window_days, 7);
        assert!(policy.max_travel_minutes.is_none());
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn duration_methods() {
        let policy = SchedulingPolicy {
            duration_minutes: 45,
            buffer_minutes: 15,
            max_travel_minutes: Some(60),
            ..SchedulingPolicy::default()
        };

        assert_eq!(policy.duration(), Duration::minutes(45));
        assert_eq!(policy.buffer(), Duration::minutes(15));
        assert_eq!(policy.max_travel(), Some(Duration::minutes(60)));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut policy = SchedulingPolicy::default();

        policy.duration_minutes = 0;
        assert!(policy.validate().is_err());

        policy = SchedulingPolicy::default();
        policy.buffer_minutes = -5;
        assert!(policy.validate().is_err());

        policy = SchedulingPolicy::default();
        policy.planning_window_days = 0;
        assert!(policy.validate().is_err());

        policy = SchedulingPolicy::default();
        policy.max_travel_minutes = Some(-1);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn deserializes_wire_format() {
        let json = r#"{
            "durationMinutes": 60,
            "bufferMinutes": 15,
            "defaultStartAddress": "Stationsplein 1, Utrecht",
            "timezone": "Europe/Amsterdam",
            "workdayMode": "FLEXIBLE",
            "includeTravelAtDayStart": true,
            "includeTravelAtDayEnd": false,
            "maxTravelMinutes": 90
        }"#;

        let policy: SchedulingPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.workday_mode, WorkdayMode::Flexible);
        assert_eq!(policy.timezone, chrono_tz::Europe::Amsterdam);
        assert_eq!(policy.max_travel_minutes, Some(90));
        // Planning window falls back to the defaults
        assert_eq!(policy.planning_offset_days, 1);
        assert_eq!(policy.planning_window_days, 7);
    }
}
