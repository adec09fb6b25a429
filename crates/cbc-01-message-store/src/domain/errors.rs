//! # Domain Errors
//!
//! Error types for the Message Store subsystem.

use shared_types::Digest;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record is stored under this digest.
    #[error("Message not found: {digest}")]
    NotFound { digest: Digest },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
