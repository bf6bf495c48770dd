//! Mock travel-time oracle for testing without API access.
//!
//! Serves travel times from an in-memory route table, and can be forced into
//! failure modes to exercise the engine's degradation paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{TravelResult, TravelTimeOracle};

/// What the mock answers when a route is not in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FallbackBehavior {
    /// Answer with the default duration, if one is set; otherwise no route.
    Table,
    /// Every lookup fails.
    FailAll,
    /// Every lookup finds no route.
    UnroutableAll,
}

/// Mock oracle that serves data from an in-memory route table.
///
/// Useful for development and testing without OpenRouteService credentials.
/// Lookups are counted so tests can assert on caching behavior.
#[derive(Debug)]
pub struct MockOracle {
    routes: HashMap<(String, String), u32>,
    default_seconds: Option<u32>,
    fallback: FallbackBehavior,
    calls: AtomicUsize,
}

impl MockOracle {
    /// Create an empty mock. Unknown routes answer `ZERO_RESULTS` unless a
    /// default duration is set.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            default_seconds: None,
            fallback: FallbackBehavior::Table,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock where every lookup fails with `ERROR`.
    pub fn failing() -> Self {
        Self {
            fallback: FallbackBehavior::FailAll,
            ..Self::new()
        }
    }

    /// Create a mock where every lookup answers `ZERO_RESULTS`.
    pub fn unroutable() -> Self {
        Self {
            fallback: FallbackBehavior::UnroutableAll,
            ..Self::new()
        }
    }

    /// Add a directed route with the given duration in seconds.
    pub fn with_route(
        mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        seconds: u32,
    ) -> Self {
        self.routes.insert((origin.into(), destination.into()), seconds);
        self
    }

    /// Set a default duration for routes not in the table.
    pub fn with_default(mut self, seconds: u32) -> Self {
        self.default_seconds = Some(seconds);
        self
    }

    /// Number of lookups served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl TravelTimeOracle for MockOracle {
    async fn travel_time(&self, origin: &str, destination: &str) -> TravelResult {
        self.calls.fetch_add(1, Ordering::Relaxed);

        match self.fallback {
            FallbackBehavior::FailAll => return TravelResult::error(),
            FallbackBehavior::UnroutableAll => return TravelResult::zero_results(),
            FallbackBehavior::Table => {}
        }

        if origin == destination {
            return TravelResult::ok(0);
        }

        if let Some(seconds) = self.routes.get(&(origin.to_string(), destination.to_string())) {
            return TravelResult::ok(*seconds);
        }

        match self.default_seconds {
            Some(seconds) => TravelResult::ok(seconds),
            None => TravelResult::zero_results(),
        }
    }
}
