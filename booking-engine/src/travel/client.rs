//! OpenRouteService HTTP client.
//!
//! Production implementation of [`TravelTimeOracle`] backed by the
//! OpenRouteService directions API. Handles authentication and concurrency
//! limiting; every failure mode maps to a [`TravelResult`] status so callers
//! never need to handle transport errors.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::warn;

use super::error::TravelClientError;
use super::{TravelResult, TravelTimeOracle};

/// Default base URL for the OpenRouteService API.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production OpenRouteService)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RoutingConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Directions API response, reduced to the fields we consume.
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    summary: Option<RouteSummary>,
}

#[derive(Debug, Deserialize)]
struct RouteSummary {
    /// Driving duration in seconds.
    duration: f64,
}

/// OpenRouteService directions client.
///
/// Points are passed as `"lon,lat"` strings, as produced by the platform's
/// geocoding step. Uses a semaphore to limit concurrent requests and avoid
/// rate limiting.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl RoutingClient {
    /// Create a new routing client with the given configuration.
    pub fn new(config: RoutingConfig) -> Result<Self, TravelClientError> {
        let mut headers = HeaderMap::new();

        // OpenRouteService takes the raw API key as the Authorization header
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| TravelClientError::InvalidApiKey)?;
        headers.insert("Authorization", api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    async fn lookup(&self, origin: &str, destination: &str) -> TravelResult {
        // Identical points take zero travel time; skip the API call.
        if origin == destination {
            return TravelResult::ok(0);
        }

        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(_) => return TravelResult::error(),
        };

        let url = format!("{}/v2/directions/driving-car", self.base_url);

        let response = match self
            .http
            .get(&url)
            .query(&[("start", origin), ("end", destination)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(origin, destination, error = %e, "travel time request failed");
                return TravelResult::error();
            }
        };

        if !response.status().is_success() {
            warn!(
                origin,
                destination,
                status = response.status().as_u16(),
                "travel time request rejected"
            );
            return TravelResult::error();
        }

        let body: DirectionsResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(origin, destination, error = %e, "malformed directions response");
                return TravelResult::error();
            }
        };

        match body.features.first().and_then(|f| f.properties.summary.as_ref()) {
            Some(summary) if summary.duration.is_finite() && summary.duration >= 0.0 => {
                TravelResult::ok(summary.duration.round() as u32)
            }
            _ => TravelResult::zero_results(),
        }
    }
}

impl TravelTimeOracle for RoutingClient {
    async fn travel_time(&self, origin: &str, destination: &str) -> TravelResult {
        self.lookup(origin, destination).await
    }
}
