//! Domain types for the availability engine.
//!
//! This module contains the core domain model types: weekly availability
//! rules, busy intervals, and output slots. Types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod busy;
mod error;
mod rule;
mod slot;
mod time;

pub use busy::{BusyInterval, DaySchedule};
pub use error::DomainError;
pub use rule::{AvailabilityRule, WeeklySchedule};
pub use slot::{Certainty, LocalizedSlot, MarginTier, Slot};
pub use time::{GRID_MINUTES, TimeError, WallTime, grid_step, round_up_to_grid};
