//! Appointment availability engine.
//!
//! Answers: "given my weekly working hours, my existing bookings, and how
//! long it takes to drive between them, when can someone book me?"

pub mod cache;
pub mod domain;
pub mod engine;
pub mod travel;
