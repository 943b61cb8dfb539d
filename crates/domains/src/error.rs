//! # DomainError
//!
//! Failure taxonomy for the presentation-decision core.
//! None of these ever reach the user: services turn every variant into a
//! "show default content" or "do not show" decision.

use thiserror::Error;

/// The primary error type for all domain and port operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Store or decode failure (e.g., report missing, payload not an integer)
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// Layout or state precondition failed (e.g., collapsed navigation bar)
    #[error("precondition not met: {0}")]
    PreconditionNotMet(String),

    /// Gating decision said no (e.g., not opted in, already presented)
    #[error("not eligible: {0}")]
    NotEligible(String),
}

/// A specialized Result type for domain logic.
pub type Result<T> = std::result::Result<T, DomainError>;
