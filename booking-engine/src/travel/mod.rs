//! Travel-time oracle.
//!
//! The engine's sole I/O dependency: an async function mapping an
//! origin/destination pair to a driving duration. The oracle never fails with
//! an error value; every outcome is expressed as a status so the engine can
//! degrade to its margin heuristic instead of aborting.

mod client;
mod error;
pub mod mock;

use std::future::Future;

use chrono::Duration;
use serde::{Deserialize, Serialize};

pub use client::{RoutingClient, RoutingConfig};
pub use error::TravelClientError;

/// Outcome status of a travel-time lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelStatus {
    /// A route was found and a duration is available.
    Ok,

    /// No route exists between the two points.
    ZeroResults,

    /// The lookup failed (network, auth, malformed response).
    Error,
}

/// Result of a travel-time lookup.
///
/// `duration_seconds` is present exactly when `status` is `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelResult {
    /// Outcome of the lookup.
    pub status: TravelStatus,

    /// Driving duration in seconds, when a route was found.
    pub duration_seconds: Option<u32>,
}

impl TravelResult {
    /// A successful lookup with the given duration.
    pub fn ok(seconds: u32) -> Self {
        Self {
            status: TravelStatus::Ok,
            duration_seconds: Some(seconds),
        }
    }

    /// No route found between the points.
    pub fn zero_results() -> Self {
        Self {
            status: TravelStatus::ZeroResults,
            duration_seconds: None,
        }
    }

    /// The lookup failed.
    pub fn error() -> Self {
        Self {
            status: TravelStatus::Error,
            duration_seconds: None,
        }
    }

    /// Whether the lookup produced a usable duration.
    pub fn is_ok(&self) -> bool {
        self.status == TravelStatus::Ok
    }

    /// The travel duration, when known.
    pub fn duration(&self) -> Option<Duration> {
        match self.status {
            TravelStatus::Ok => self
                .duration_seconds
                .map(|s| Duration::seconds(i64::from(s))),
            _ => None,
        }
    }
}

/// Trait for travel-time lookups.
///
/// This abstraction allows the engine to be tested with mock data and lets
/// callers layer memoization on top (see [`crate::cache::CachedOracle`]).
/// Implementations must resolve to a [`TravelResult`] even on failure and
/// must never panic.
pub trait TravelTimeOracle {
    /// Look up the travel time from `origin` to `destination`.
    fn travel_time(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = TravelResult> + Send;
}
