//! Driving ports (Inbound API)

use std::collections::{BTreeMap, BTreeSet};

use shared_types::{Digest, SenderId};

use crate::domain::{ParseOutcome, ValidationResult};

/// Primary Validation API
///
/// The surface a message-feeding caller and fork-choice consumers use.
pub trait ValidationApi: Send + Sync {
    /// Validate the message at `digest` and its whole justification closure.
    ///
    /// Protocol violations come back as `ParseOutcome::Rejected`; `Err` is
    /// reserved for a misbehaving store.
    fn parse_msg(&self, digest: &Digest) -> ValidationResult<ParseOutcome>;

    /// Latest valid message from `sender`, if any.
    fn latest_message(&self, sender: &SenderId) -> Option<Digest>;

    /// Whether `sender` was ever caught violating the protocol.
    fn is_byzantine(&self, sender: &SenderId) -> bool;

    /// Snapshot of the latest-valid-message table.
    fn latest_messages(&self) -> BTreeMap<SenderId, Digest>;

    /// Snapshot of the Byzantine-flag set.
    fn byzantine_senders(&self) -> BTreeSet<SenderId>;
}
