//! Error types for the Validation subsystem
//!
//! Two families:
//! - [`Violation`]: a protocol outcome. A message broke a rule; the engine
//!   reports it as a value inside `ParseOutcome::Rejected`.
//! - [`ValidationError`]: a contract violation by a collaborator (store
//!   corruption). Fatal to the caller.

use serde::{Deserialize, Serialize};
use shared_types::{Digest, Estimate, SenderId};
use std::fmt;
use thiserror::Error;

/// Why a justification reference could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MalformedReason {
    /// The referenced digest is not in the store.
    Dangling,
    /// The referenced digest is already being validated higher up the path.
    Cyclic,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dangling => f.write_str("dangling"),
            Self::Cyclic => f.write_str("cyclic"),
        }
    }
}

/// A protocol violation detected while validating a message.
///
/// `message` is always the digest of the message that failed the check,
/// which may sit deep inside the justification closure of the digest
/// passed to `parse_msg`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Violation {
    #[error("Malformed justification in {message}: {reason} reference {reference}")]
    MalformedJustification {
        message: Digest,
        reference: Digest,
        reason: MalformedReason,
    },

    #[error("{sender} did not cite its previous message {expected} in {message}")]
    MissingOwnPriorCitation {
        message: Digest,
        sender: SenderId,
        expected: Digest,
    },

    #[error("{sender} cited {cited} instead of its previous message {expected} in {message}")]
    CitationEquivocation {
        message: Digest,
        sender: SenderId,
        expected: Digest,
        cited: Digest,
    },

    #[error("{author} cited two messages from {duplicated} ({first}, {second}) in {message}")]
    SiblingDuplicateSender {
        message: Digest,
        author: SenderId,
        duplicated: SenderId,
        first: Digest,
        second: Digest,
    },

    #[error("Fork in history of {sender}: {left} and {right} are incomparable (via {message})")]
    TransitiveForkDetected {
        message: Digest,
        sender: SenderId,
        left: Digest,
        right: Digest,
    },

    #[error("{sender} declared estimate {declared}, justification supports {expected} in {message}")]
    EstimateMismatch {
        message: Digest,
        sender: SenderId,
        declared: Estimate,
        expected: Estimate,
    },

    #[error("{sender} is already flagged Byzantine; {message} rejected without checks")]
    FlaggedSender { message: Digest, sender: SenderId },
}

impl Violation {
    /// Digest of the message that failed the check.
    pub fn message(&self) -> Digest {
        match self {
            Self::MalformedJustification { message, .. }
            | Self::MissingOwnPriorCitation { message, .. }
            | Self::CitationEquivocation { message, .. }
            | Self::SiblingDuplicateSender { message, .. }
            | Self::TransitiveForkDetected { message, .. }
            | Self::EstimateMismatch { message, .. }
            | Self::FlaggedSender { message, .. } => *message,
        }
    }

    /// The sender this violation attributes as Byzantine.
    pub fn culprit(&self) -> Option<&SenderId> {
        match self {
            Self::MalformedJustification { .. } | Self::FlaggedSender { .. } => None,
            Self::MissingOwnPriorCitation { sender, .. }
            | Self::CitationEquivocation { sender, .. }
            | Self::TransitiveForkDetected { sender, .. }
            | Self::EstimateMismatch { sender, .. } => Some(sender),
            Self::SiblingDuplicateSender { author, .. } => Some(author),
        }
    }

    /// Every sender to flag for this violation.
    ///
    /// A sibling duplicate also implicates the duplicated sender when the two
    /// cited messages differ: that sender authored both.
    pub fn byzantine_senders(&self) -> Vec<&SenderId> {
        match self {
            Self::SiblingDuplicateSender {
                author,
                duplicated,
                first,
                second,
                ..
            } if first != second && author != duplicated => vec![author, duplicated],
            other => other.culprit().into_iter().collect(),
        }
    }

    /// Whether the outcome may change once the store learns more.
    ///
    /// Only dangling references qualify; their verdict is not memoized.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::MalformedJustification {
                reason: MalformedReason::Dangling,
                ..
            }
        )
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJustification { .. } => "malformed_justification",
            Self::MissingOwnPriorCitation { .. } => "missing_own_prior_citation",
            Self::CitationEquivocation { .. } => "citation_equivocation",
            Self::SiblingDuplicateSender { .. } => "sibling_duplicate_sender",
            Self::TransitiveForkDetected { .. } => "transitive_fork_detected",
            Self::EstimateMismatch { .. } => "estimate_mismatch",
            Self::FlaggedSender { .. } => "flagged_sender",
        }
    }
}

/// Contract violations by the engine's collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The store returned a record whose content does not hash to its key.
    #[error("Store corruption: record under {requested} hashes to {actual}")]
    StoreCorruption { requested: Digest, actual: Digest },
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
