use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use shared_types::{Digest, SenderId};

use crate::domain::{ChainRecord, MessageStatus, Violation};

/// Terminal, memoized outcome for one digest.
#[derive(Clone, Debug)]
pub(super) enum Verdict {
    Valid(Arc<ChainRecord>),
    Invalid(Violation),
}

/// Encapsulates the mutable state of one validation engine.
/// Guarded as a whole by the engine's mutex.
#[derive(Debug, Default)]
pub(super) struct EngineState {
    pub latest: BTreeMap<SenderId, Digest>,
    pub byzantine: BTreeSet<SenderId>,
    pub verdicts: HashMap<Digest, Verdict>,
    pub validated: u64,
    pub rejected: u64,
}

impl EngineState {
    pub fn status(&self, digest: &Digest) -> MessageStatus {
        match self.verdicts.get(digest) {
            None => MessageStatus::Unseen,
            Some(Verdict::Valid(_)) => MessageStatus::Valid,
            Some(Verdict::Invalid(violation)) => MessageStatus::Invalid(violation.clone()),
        }
    }

    pub fn record(&self, digest: &Digest) -> Option<&Arc<ChainRecord>> {
        match self.verdicts.get(digest)? {
            Verdict::Valid(record) => Some(record),
            Verdict::Invalid(_) => None,
        }
    }

    /// Latest messages of senders never flagged Byzantine.
    pub fn honest_latest(&self) -> impl Iterator<Item = (&SenderId, &Digest)> {
        self.latest
            .iter()
            .filter(|(sender, _)| !self.byzantine.contains(*sender))
    }
}
