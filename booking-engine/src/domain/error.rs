//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from engine and travel-client errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Busy interval does not satisfy `start < end`
    #[error("invalid busy interval: {0}")]
    InvalidInterval(&'static str),

    /// Availability rule is malformed (e.g. day of week out of range)
    #[error("invalid availability rule: {0}")]
    InvalidRule(&'static str),
}
