//! # cbc-02-validation
//!
//! Message validation and Byzantine detection for binary CBC-Casper.
//!
//! ## Architecture
//!
//! The engine is driven by a caller feeding it message digests one at a
//! time. Each digest is validated together with its whole justification
//! closure, children before parents:
//!
//! ```text
//! caller ──parse_msg(digest)──→ [ValidationEngine] ──retrieve──→ [MessageStore]
//!                                      │
//!                 ┌────────────────────┼────────────────────┐
//!                 ↓                    ↓                    ↓
//!        latest-valid table     Byzantine flags       verdict memo
//!                 │                    │
//!                 └──────→ fork-choice consumers ←──────────┘
//! ```
//!
//! ### Checks per message
//!
//! 1. Every justification entry resolves and is itself valid
//! 2. No two entries share a sender
//! 3. The sender cites its own latest valid message
//! 4. No sender's history forks anywhere in the closure
//! 5. The declared estimate matches the weighted majority of the entries
//!
//! A rejected call commits nothing to the latest-valid table; the senders
//! blamed by the failing check are flagged Byzantine for good.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cbc_01_message_store::{InMemoryMessageStore, MessageBody, MessageStore};
//! use cbc_02_validation::ValidationEngine;
//!
//! let store = Arc::new(InMemoryMessageStore::new());
//! let engine = ValidationEngine::with_uniform_weights("Test", Estimate::Zero, 0, store.clone());
//!
//! let msg = store.store(MessageBody::genesis("Brian", Estimate::Zero));
//! assert!(engine.parse_msg(&msg)?.is_accepted());
//! ```

pub mod adapters;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-export main types
pub use adapters::StaticWeightTable;
pub use domain::{
    BinaryEstimator, ChainRecord, EngineStats, EstimateTally, MalformedReason, MessageStatus,
    ParseOutcome, Proposal, ValidationConfig, ValidationError, ValidationResult, Violation,
};
pub use ports::{ValidationApi, WeightProvider};
pub use service::ValidationEngine;
