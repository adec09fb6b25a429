//! Message domain entities
//!
//! A [`MessageBody`] is what a caller hands to the store. A [`Message`] is the
//! canonical, immutable record the store keeps: its justification is a flat
//! list of digests.

use serde::{Deserialize, Serialize};
use sha3::{Digest as _, Keccak256};
use shared_types::{Digest, Estimate, SenderId};

/// Domain separation tag mixed into every message digest.
const DIGEST_DOMAIN: &[u8] = b"cbc-message/v1";

/// One entry of a submitted justification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JustificationEntry {
    /// A full message body, stored before the message citing it.
    Inline(MessageBody),
    /// A message that is already in the store.
    Reference(Digest),
}

impl From<MessageBody> for JustificationEntry {
    fn from(body: MessageBody) -> Self {
        JustificationEntry::Inline(body)
    }
}

impl From<Digest> for JustificationEntry {
    fn from(digest: Digest) -> Self {
        JustificationEntry::Reference(digest)
    }
}

/// An uncanonicalized message as submitted by a caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub sender: SenderId,
    pub estimate: Estimate,
    pub justification: Vec<JustificationEntry>,
}

impl MessageBody {
    pub fn new(
        sender: impl Into<SenderId>,
        estimate: Estimate,
        justification: Vec<JustificationEntry>,
    ) -> Self {
        Self {
            sender: sender.into(),
            estimate,
            justification,
        }
    }

    /// A message with an empty justification.
    pub fn genesis(sender: impl Into<SenderId>, estimate: Estimate) -> Self {
        Self::new(sender, estimate, Vec::new())
    }

    /// Append a justification entry (inline body or digest).
    pub fn cite(mut self, entry: impl Into<JustificationEntry>) -> Self {
        self.justification.push(entry.into());
        self
    }

    /// Replace every inline entry by the digest `store_inline` returns for it.
    ///
    /// Entries are visited in order, so nested bodies are stored depth-first.
    pub fn canonicalize<F>(self, mut store_inline: F) -> Message
    where
        F: FnMut(MessageBody) -> Digest,
    {
        let justification = self
            .justification
            .into_iter()
            .map(|entry| match entry {
                JustificationEntry::Inline(body) => store_inline(body),
                JustificationEntry::Reference(digest) => digest,
            })
            .collect();

        Message {
            sender: self.sender,
            estimate: self.estimate,
            justification,
        }
    }
}

/// A canonical, content-addressed message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub sender: SenderId,
    pub estimate: Estimate,
    pub justification: Vec<Digest>,
}

impl Message {
    pub fn new(sender: impl Into<SenderId>, estimate: Estimate, justification: Vec<Digest>) -> Self {
        Self {
            sender: sender.into(),
            estimate,
            justification,
        }
    }

    /// Compute the content digest of this message.
    ///
    /// Variable-length fields are length-prefixed so distinct messages never
    /// share an encoding.
    pub fn digest(&self) -> Digest {
        let sender = self.sender.as_str().as_bytes();

        let mut hasher = Keccak256::new();
        hasher.update(DIGEST_DOMAIN);
        hasher.update((sender.len() as u32).to_le_bytes());
        hasher.update(sender);
        hasher.update([self.estimate.as_u8()]);
        hasher.update((self.justification.len() as u32).to_le_bytes());
        for cited in &self.justification {
            hasher.update(cited.as_bytes());
        }
        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        Digest(hash)
    }

    /// Check if this is an initial message (no justification)
    pub fn is_genesis(&self) -> bool {
        self.justification.is_empty()
    }
}
