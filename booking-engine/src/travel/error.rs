//! Routing client error types.

/// Errors from constructing the routing HTTP client.
///
/// Lookup failures never surface here; they degrade to
/// [`TravelStatus::Error`](super::TravelStatus) results instead.
#[derive(Debug, thiserror::Error)]
pub enum TravelClientError {
    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// API key contains characters not valid in an HTTP header
    #[error("invalid API key format")]
    InvalidApiKey,
}
