//! The availability engine.
//!
//! Computes bookable slots from a weekly schedule, a set of existing
//! bookings, a scheduling policy, and a travel-time oracle. [`Engine`] is the
//! entry point; [`Engine::compute`] walks the full planning window and
//! [`Engine::verify`] re-checks a single picked slot with known travel
//! durations.

mod compute;
mod day;
mod feasibility;
mod margin;
mod policy;
mod resolve;
mod verify;


pub use compute::{AvailabilityRequest, Engine, EngineError};
pub use policy::{SchedulingPolicy, WorkdayMode};
pub use verify::{KnownTravel, VerifyOutcome, VerifyRequest};
