//! # Error Types
//!
//! Errors raised when converting raw values into shared types.

use thiserror::Error;

/// Errors that can occur while building shared types from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Estimate outside the binary domain.
    #[error("Invalid estimate: {0} (expected 0 or 1)")]
    InvalidEstimate(u8),

    /// Digest string is not 64 hex characters.
    #[error("Invalid digest encoding: {0}")]
    InvalidDigest(String),
}
