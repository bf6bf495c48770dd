//! Slot verification (ripple recompute).
//!
//! Once a user has picked a candidate, the caller looks up the real travel
//! times and asks the engine to confirm the choice. Verification re-walks
//! only the affected day with those durations supplied up front, so the
//! answer is exact where the original computation may have estimated. The
//! recomputed day also gives the caller the updated neighborhood of slots to
//! re-render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{BusyInterval, Slot};
use crate::travel::{TravelResult, TravelTimeOracle};

use super::compute::{self, Engine, EngineError};
use super::day::DayContext;

/// Travel durations the caller already resolved for the picked slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownTravel {
    /// Seconds of travel to the appointment destination.
    pub to_seconds: u32,

    /// Seconds of travel from the destination onward.
    pub from_seconds: u32,
}

/// Request to verify one picked slot.
#[derive(Debug, Clone)]
pub struct VerifyRequest {
    /// Where the prospective appointment takes place.
    pub destination: String,

    /// Snapshot of the owner's existing bookings.
    pub busy: Vec<BusyInterval>,

    /// Start instant of the slot the user picked.
    pub slot_start: DateTime<Utc>,

    /// Resolved travel durations for the picked slot.
    pub known_travel: KnownTravel,

    /// Reference instant, as in [`super::AvailabilityRequest`].
    pub now: DateTime<Utc>,
}

/// Result of verifying one picked slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOutcome {
    /// Whether the picked start instant survives the recompute.
    pub is_feasible: bool,

    /// The recomputed slots for the picked day.
    pub day_slots: Vec<Slot>,
}

/// Oracle that answers from caller-supplied durations without I/O.
///
/// Every leg the walker asks about has the verification destination on one
/// side: legs toward it get `to_seconds`, legs away from it `from_seconds`.
struct KnownTravelOracle<'a> {
    destination: &'a str,
    travel: KnownTravel,
}

impl TravelTimeOracle for KnownTravelOracle<'_> {
    async fn travel_time(&self, origin: &str, destination: &str) -> TravelResult {
        if destination == self.destination {
            TravelResult::ok(self.travel.to_seconds)
        } else if origin == self.destination {
            TravelResult::ok(self.travel.from_seconds)
        } else {
            TravelResult::ok(0)
        }
    }
}

impl<O: TravelTimeOracle> Engine<'_, O> {
    /// Verify a picked slot against the current bookings.
    ///
    /// Recomputes the picked day only, using the supplied travel durations
    /// instead of the engine's own oracle. The slot is feasible iff a slot
    /// with exactly the picked start instant survives.
    pub async fn verify(&self, request: &VerifyRequest) -> Result<VerifyOutcome, EngineError> {
        self.policy.validate()?;

        let date = request
            .slot_start
            .with_timezone(&self.policy.timezone)
            .date_naive();
        let oracle = KnownTravelOracle {
            destination: &request.destination,
            travel: request.known_travel,
        };

        let mut day_slots = Vec::new();
        if let Some(ctx) = DayContext::build(date, self.schedule, self.policy, &request.busy) {
            compute::walk_day(
                self.policy,
                &ctx,
                &request.destination,
                request.now,
                &oracle,
                &mut day_slots,
            )
            .await;
        }

        let is_feasible = day_slots.iter().any(|s| s.start == request.slot_start);
        debug!(slot_start = %request.slot_start, is_feasible, slots = day_slots.len(), "verified slot");

        Ok(VerifyOutcome {
            is_feasible,
            day_slots,
        })
    }
}
