//! Results reported by the validation engine

use serde::{Deserialize, Serialize};
use shared_types::Digest;

use super::Violation;

/// Outcome of `parse_msg` for one root digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseOutcome {
    /// The message and its whole justification closure are valid.
    Accepted,
    /// Some message in the closure broke a rule.
    Rejected(Violation),
}

impl ParseOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Accepted => None,
            Self::Rejected(violation) => Some(violation),
        }
    }
}

impl From<Result<(), Violation>> for ParseOutcome {
    fn from(result: Result<(), Violation>) -> Self {
        match result {
            Ok(()) => Self::Accepted,
            Err(violation) => Self::Rejected(violation),
        }
    }
}

/// What the engine currently knows about a digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    /// Never validated, or last seen with a dangling reference.
    Unseen,
    Valid,
    Invalid(Violation),
}

/// Counters over the lifetime of an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Messages with a committed valid verdict
    pub validated: u64,
    /// Messages with a memoized invalid verdict
    pub rejected: u64,
    /// Senders flagged Byzantine
    pub byzantine: usize,
    /// Senders with a latest message
    pub senders: usize,
}

/// A message built and validated by the engine itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub digest: Digest,
    pub outcome: ParseOutcome,
}
