//! Time-grid slot computation.
//!
//! The walker enumerates candidate start instants across the planning window
//! at 15-minute granularity. Each candidate is resolved against the travel
//! policy, checked for feasibility against the day's bookings, and either
//! emitted as a slot or skipped. Evaluation is sequential: the oracle answer
//! for one candidate decides where the next candidate is even considered.

use chrono::{DateTime, Days, Duration, Utc};
use tracing::{debug, trace};

use crate::domain::{BusyInterval, Certainty, Slot, WeeklySchedule, grid_step, round_up_to_grid};
use crate::travel::TravelTimeOracle;

use super::day::DayContext;
use super::feasibility::{self, TotalBlock, Verdict};
use super::margin;
use super::policy::SchedulingPolicy;
use super::resolve;

/// Iteration guard on the travel/start fixed-point loop.
const MAX_RESOLVE_ITERATIONS: usize = 4;

/// Error from slot computation.
///
/// Only genuinely invalid input surfaces here. Oracle failures, unreachable
/// candidates, and misconfigured days all degrade instead (see the margin
/// heuristic and day skipping).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The scheduling policy is malformed
    #[error("invalid scheduling policy: {0}")]
    InvalidPolicy(&'static str),
}

/// Request for an availability computation.
#[derive(Debug, Clone)]
pub struct AvailabilityRequest {
    /// Where the prospective appointment takes place.
    pub destination: String,

    /// Snapshot of the owner's existing bookings.
    pub busy: Vec<BusyInterval>,

    /// Reference instant the planning window is anchored to. Passed in
    /// rather than read from the clock so computations are reproducible.
    pub now: DateTime<Utc>,
}

/// The availability engine.
///
/// Holds immutable references to the inputs of one computation; concurrent
/// invocations share no mutable state.
pub struct Engine<'a, O: TravelTimeOracle> {
    pub(super) schedule: &'a WeeklySchedule,
    pub(super) policy: &'a SchedulingPolicy,
    pub(super) oracle: &'a O,
}

impl<'a, O: TravelTimeOracle> Engine<'a, O> {
    /// Create a new engine over a schedule, policy, and travel oracle.
    pub fn new(schedule: &'a WeeklySchedule, policy: &'a SchedulingPolicy, oracle: &'a O) -> Self {
        Self {
            schedule,
            policy,
            oracle,
        }
    }

    /// Compute the bookable slots across the planning window.
    ///
    /// Returns slots sorted ascending by start, deduplicated by start
    /// instant. Fails only on a malformed policy; every transient problem
    /// degrades to lower-confidence slots or skipped days.
    pub async fn compute(&self, request: &AvailabilityRequest) -> Result<Vec<Slot>, EngineError> {
        self.policy.validate()?;

        let today = request.now.with_timezone(&self.policy.timezone).date_naive();
        let mut slots = Vec::new();

        let first = self.policy.planning_offset_days;
        let last = first + self.policy.planning_window_days;
        for offset in first..last {
            let Some(date) = today.checked_add_days(Days::new(offset as u64)) else {
                continue;
            };
            let Some(ctx) = DayContext::build(date, self.schedule, self.policy, &request.busy)
            else {
                trace!(%date, "day unavailable, skipping");
                continue;
            };

            walk_day(
                self.policy,
                &ctx,
                &request.destination,
                request.now,
                self.oracle,
                &mut slots,
            )
            .await;
        }

        slots.sort_by_key(|s| s.start);
        slots.dedup_by_key(|s| s.start);

        Ok(slots)
    }
}

/// Walk one day's grid, appending feasible slots to `out`.
///
/// Shared between the full computation and the single-day verifier.
pub(super) async fn walk_day<O: TravelTimeOracle>(
    policy: &SchedulingPolicy,
    ctx: &DayContext,
    destination: &str,
    now: DateTime<Utc>,
    oracle: &O,
    out: &mut Vec<Slot>,
) {
    let duration = policy.duration();
    let buffer = policy.buffer();
    let step = grid_step();

    // When the walk starts mid-day (today), never look into the past.
    let mut cursor = round_up_to_grid(ctx.day_start.max(now));

    debug!(
        date = %ctx.date,
        day_start = %ctx.day_start,
        day_end = %ctx.day_end,
        busy = ctx.busy.len(),
        "walking day"
    );

    while cursor + duration <= ctx.day_end {
        let mut prev = ctx.busy.preceding(cursor);
        let mut travel_to = oracle
            .travel_time(resolve::origin_for(prev, policy), destination)
            .await;

        // Fixed point: the resolved start depends on travel time, which
        // depends on the preceding booking, which can change once the start
        // moves. Re-resolve until the preceding booking is stable.
        let mut start = None;
        for _ in 0..MAX_RESOLVE_ITERATIONS {
            let candidate = resolve::earliest_start(
                policy,
                cursor,
                prev,
                travel_to.duration().unwrap_or_else(Duration::zero),
            );
            let prev_here = ctx.busy.preceding(candidate);
            if prev_here == prev {
                start = Some(candidate);
                break;
            }
            prev = prev_here;
            travel_to = oracle
                .travel_time(resolve::origin_for(prev, policy), destination)
                .await;
        }
        let Some(start) = start else {
            trace!(%cursor, "start resolution did not settle, stepping");
            cursor += step;
            continue;
        };

        // Max-commute cutoff: the candidate is dropped, not the day.
        if let (Some(max), Some(t)) = (policy.max_travel(), travel_to.duration()) {
            if t > max {
                trace!(%cursor, travel_mins = t.num_minutes(), "exceeds max travel");
                cursor += step;
                continue;
            }
        }

        let end = start + duration;
        if end > ctx.day_end {
            // The grid has passed the last possible start for this day.
            break;
        }

        let next = ctx.busy.following(end);
        let travel_from = if resolve::counts_travel_from(policy, next.is_some()) {
            Some(
                oracle
                    .travel_time(destination, resolve::next_destination_for(next, policy))
                    .await,
            )
        } else {
            None
        };

        let counted_to = resolve::counts_travel_to(policy, prev.is_some());
        let block = TotalBlock::around(
            start,
            end,
            buffer,
            if counted_to { travel_to.duration() } else { None },
            travel_from.as_ref().and_then(|r| r.duration()),
        );

        // A counted return leg with nothing after it must fit inside the
        // work window; later candidates only push it further out.
        if travel_from.is_some() && next.is_none() && block.end > ctx.day_end {
            break;
        }

        match feasibility::check(ctx, start, end, block) {
            Verdict::Conflict(busy) => {
                // Jump straight past the booking instead of scanning
                // through a known-occupied region.
                let jump = round_up_to_grid(busy.end + buffer);
                cursor = if jump > cursor { jump } else { cursor + step };
                trace!(%start, busy_end = %busy.end, %cursor, "conflict, jumping past booking");
            }
            Verdict::OutsideWindow => {
                cursor += step;
            }
            Verdict::Feasible => {
                let confirmed =
                    travel_to.is_ok() && travel_from.as_ref().is_none_or(|r| r.is_ok());
                let certainty = if confirmed {
                    Certainty::Green
                } else {
                    Certainty::Margin(margin::classify(start, end, prev, next, buffer))
                };

                trace!(%start, %end, %certainty, "slot");
                out.push(Slot {
                    start,
                    end,
                    certainty,
                });

                let advanced = round_up_to_grid(end + buffer);
                cursor = if advanced > cursor { advanced } else { cursor + step };
            }
        }
    }
}
