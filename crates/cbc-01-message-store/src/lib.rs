//! # cbc-01-message-store
//!
//! Content-addressed message store for the binary CBC-Casper protocol.
//!
//! ## Overview
//!
//! Every message is identified by the Keccak-256 digest of its canonical
//! `(sender, estimate, justification digests)` tuple. Callers submit a
//! [`MessageBody`] whose justification entries may be inline bodies or
//! references to already-stored digests; the store flattens the inline
//! entries depth-first, in the given order, and returns the digest of the
//! resulting canonical [`Message`].
//!
//! ```text
//! MessageBody ──store()──→ [inline entries stored first] ──→ Message ──→ Digest
//!                                                                │
//!                                 retrieve(Digest) ←─────────────┘
//! ```
//!
//! ## Invariants
//!
//! - Records are write-once: identical content collapses to one record.
//! - Records are never mutated or deleted.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cbc_01_message_store::{InMemoryMessageStore, MessageBody, MessageStore};
//!
//! let store = InMemoryMessageStore::new();
//! let genesis = store.store(MessageBody::genesis("Brian", Estimate::Zero));
//! let message = store.retrieve(&genesis)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryMessageStore;
pub use domain::{JustificationEntry, Message, MessageBody, StoreError, StoreResult};
pub use ports::MessageStore;
