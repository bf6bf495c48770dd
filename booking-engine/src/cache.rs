//! Caller-side memoization for travel-time lookups.
//!
//! The engine queries travel time per candidate for correctness, but within
//! one request most candidates share the same origin/destination pair. This
//! layer caches confirmed durations keyed by that pair; the engine itself
//! stays cache-free and its output is unaffected.
//!
//! Only `OK` results are cached, so a transient oracle outage does not pin
//! failures for the TTL.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::travel::{TravelResult, TravelTimeOracle};

/// Cache key: (origin, destination).
type RouteKey = (String, String);

/// Configuration for the travel-time cache.
#[derive(Debug, Clone)]
pub struct OracleCacheConfig {
    /// TTL for cached durations.
    pub ttl: Duration,

    /// Maximum number of cached routes.
    pub max_capacity: u64,
}

impl Default for OracleCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// A travel-time oracle with memoization.
///
/// Wraps any [`TravelTimeOracle`] and serves repeated lookups for the same
/// origin/destination pair from cache.
pub struct CachedOracle<O> {
    inner: O,
    cache: MokaCache<RouteKey, u32>,
}

impl<O> CachedOracle<O> {
    /// Create a new cached oracle.
    pub fn new(inner: O, config: &OracleCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Access the underlying oracle.
    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Number of cached routes.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached routes.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl<O> TravelTimeOracle for CachedOracle<O>
where
    O: TravelTimeOracle + Sync,
{
    async fn travel_time(&self, origin: &str, destination: &str) -> TravelResult {
        let key = (origin.to_string(), destination.to_string());

        if let Some(seconds) = self.cache.get(&key).await {
            return TravelResult::ok(seconds);
        }

        let result = self.inner.travel_time(origin, destination).await;

        if let (true, Some(seconds)) = (result.is_ok(), result.duration_seconds) {
            self.cache.insert(key, seconds).await;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel::TravelStatus;
    use crate::travel::mock::MockOracle;

    #[tokio::test]
    async fn second_lookup_hits_cache() {
        let mock = MockOracle::new().with_route("A", "B", 600);
        let cached = CachedOracle::new(mock, &OracleCacheConfig::default());

        let first = cached.travel_time("A", "B").await;
        assert_eq!(first, TravelResult::ok(600));

        let second = cached.travel_time("A", "B").await;
        assert_eq!(second, TravelResult::ok(600));

        assert_eq!(cached.inner().call_count(), 1);
    }

    #[tokio::test]
    async fn distinct_pairs_are_distinct_entries() {
        let mock = MockOracle::new().with_default(60);
        let cached = CachedOracle::new(mock, &OracleCacheConfig::default());

        cached.travel_time("A", "B").await;
        cached.travel_time("B", "A").await;

        assert_eq!(cached.inner().call_count(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let mock = MockOracle::failing();
        let cached = CachedOracle::new(mock, &OracleCacheConfig::default());

        let first = cached.travel_time("A", "B").await;
        assert_eq!(first.status, TravelStatus::Error);

        let second = cached.travel_time("A", "B").await;
        assert_eq!(second.status, TravelStatus::Error);

        // Both lookups reached the inner oracle.
        assert_eq!(cached.inner().call_count(), 2);
    }

    #[tokio::test]
    async fn invalidate_clears_entries() {
        let mock = MockOracle::new().with_default(60);
        let cached = CachedOracle::new(mock, &OracleCacheConfig::default());

        cached.travel_time("A", "B").await;
        cached.invalidate_all();
        cached.travel_time("A", "B").await;

        assert_eq!(cached.inner().call_count(), 2);
    }
}
