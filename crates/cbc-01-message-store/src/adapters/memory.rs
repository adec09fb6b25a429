//! In-memory message store.
//!
//! Append-only `HashMap` behind a `parking_lot::RwLock`: concurrent readers,
//! serialized insert-if-absent writers.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::Digest;
use tracing::trace;

use crate::domain::{Message, StoreError, StoreResult};
use crate::ports::MessageStore;

/// Content-addressed store held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    records: RwLock<HashMap<Digest, Arc<Message>>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under a caller-chosen key without recomputing its digest.
    ///
    /// Only for exercising corruption handling in tests of downstream
    /// subsystems; a store built this way breaks content addressing.
    #[doc(hidden)]
    pub fn insert_unchecked(&self, digest: Digest, message: Message) {
        self.records.write().insert(digest, Arc::new(message));
    }
}

impl MessageStore for InMemoryMessageStore {
    fn insert(&self, message: Message) -> Digest {
        let digest = message.digest();

        let mut records = self.records.write();
        records.entry(digest).or_insert_with(|| {
            trace!(
                "[cbc-01] Stored message {} from {} ({} citations)",
                digest.short(),
                message.sender,
                message.justification.len()
            );
            Arc::new(message)
        });

        digest
    }

    fn retrieve(&self, digest: &Digest) -> StoreResult<Arc<Message>> {
        self.records
            .read()
            .get(digest)
            .cloned()
            .ok_or(StoreError::NotFound { digest: *digest })
    }

    fn contains(&self, digest: &Digest) -> bool {
        self.records.read().contains_key(digest)
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}
