//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Addressing**: `Digest`
//! - **Participants**: `SenderId`, `Weight`
//! - **Protocol values**: `Estimate`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TypeError;

// =============================================================================
// CLUSTER A: ADDRESSING
// =============================================================================

/// A 32-byte content digest (Keccak-256 of a canonical message).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// The all-zero digest.
    pub const ZERO: Digest = Digest([0u8; 32]);

    /// Wrap raw digest bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Digest(bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First 8 hex characters, for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short())
    }
}

impl FromStr for Digest {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| TypeError::InvalidDigest(s.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| TypeError::InvalidDigest(s.to_string()))?;
        Ok(Digest(bytes))
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Digest(bytes)
    }
}

// =============================================================================
// CLUSTER B: PARTICIPANTS
// =============================================================================

/// Identifier of the validator that authored a message.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SenderId(pub String);

impl SenderId {
    pub fn new(name: impl Into<String>) -> Self {
        SenderId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<&str> for SenderId {
    fn from(name: &str) -> Self {
        SenderId(name.to_string())
    }
}

impl From<String> for SenderId {
    fn from(name: String) -> Self {
        SenderId(name)
    }
}

/// Voting weight of a validator. Tallies accumulate into `u128`.
pub type Weight = u64;

// =============================================================================
// CLUSTER C: PROTOCOL VALUES
// =============================================================================

/// A binary estimate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Estimate {
    #[default]
    Zero,
    One,
}

impl Estimate {
    pub fn as_u8(self) -> u8 {
        match self {
            Estimate::Zero => 0,
            Estimate::One => 1,
        }
    }

    /// The other value of the binary domain.
    pub fn flip(self) -> Self {
        match self {
            Estimate::Zero => Estimate::One,
            Estimate::One => Estimate::Zero,
        }
    }
}

impl TryFrom<u8> for Estimate {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Estimate::Zero),
            1 => Ok(Estimate::One),
            other => Err(TypeError::InvalidEstimate(other)),
        }
    }
}

impl From<Estimate> for u8 {
    fn from(estimate: Estimate) -> Self {
        estimate.as_u8()
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
