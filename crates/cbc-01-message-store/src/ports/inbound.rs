//! # Inbound Ports (Driving Ports)
//!
//! The API the Message Store offers to the validation engine and to callers
//! that submit messages.

use std::sync::Arc;

use shared_types::Digest;

use crate::domain::{Message, MessageBody, StoreResult};

/// Content-addressed message store.
///
/// Implementations must be append-only: a digest, once stored, always
/// retrieves the same record.
pub trait MessageStore: Send + Sync {
    /// Store an already canonical message and return its digest.
    ///
    /// Storing identical content twice returns the same digest and does not
    /// create a second record.
    fn insert(&self, message: Message) -> Digest;

    /// Retrieve the message stored under `digest`.
    fn retrieve(&self, digest: &Digest) -> StoreResult<Arc<Message>>;

    /// Check if a record exists for `digest`.
    fn contains(&self, digest: &Digest) -> bool;

    /// Number of distinct records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store a message body, storing its inline justification entries first.
    ///
    /// Inline entries are stored depth-first in the order given and replaced
    /// by their digests before the canonical record is hashed.
    fn store(&self, body: MessageBody) -> Digest {
        let message = body.canonicalize(|inner| self.store(inner));
        self.insert(message)
    }
}
