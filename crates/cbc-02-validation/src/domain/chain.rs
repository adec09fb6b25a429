//! # Sender Chains and Fork Detection
//!
//! Every valid message extends its sender's own chain: it cites the sender's
//! previous message (if any), so each sender's valid messages form a linked
//! list ordered by sequence number.
//!
//! ## Algorithm: Transitive Fork-Freedom
//!
//! 1. Each valid message records a *frontier*: for every sender appearing in
//!    its justification closure (itself included), the highest message of
//!    that sender in the closure
//! 2. A new message merges the frontiers of its justification entries
//! 3. Two frontier entries for one sender must lie on that sender's chain,
//!    one extending the other; otherwise the sender forked its history
//!
//! Frontiers make the check proportional to the number of senders instead of
//! the size of the closure.

use serde::{Deserialize, Serialize};
use shared_types::{Digest, Estimate, SenderId};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Chain position of a validated message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRecord {
    pub sender: SenderId,
    pub estimate: Estimate,
    /// The sender's previous message cited by this one
    pub own_prev: Option<Digest>,
    /// Position on the sender's chain (0 for the first message)
    pub seq: u64,
    /// Highest message per sender in the justification closure, self included
    pub frontier: BTreeMap<SenderId, Digest>,
}

impl ChainRecord {
    /// Build the record for `digest` on top of its own previous message.
    ///
    /// `frontier` is the merged frontier of the justification entries.
    pub fn new(
        digest: Digest,
        sender: SenderId,
        estimate: Estimate,
        own_prev: Option<(Digest, &ChainRecord)>,
        mut frontier: BTreeMap<SenderId, Digest>,
    ) -> Self {
        let seq = own_prev.map_or(0, |(_, prev)| prev.seq + 1);
        frontier.insert(sender.clone(), digest);
        Self {
            sender,
            estimate,
            own_prev: own_prev.map(|(prev, _)| prev),
            seq,
            frontier,
        }
    }
}

/// Read access to the chain records of validated messages.
pub trait ChainLookup {
    fn chain_record(&self, digest: &Digest) -> Option<Arc<ChainRecord>>;
}

/// Two messages of one sender, neither extending the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForkConflict {
    pub sender: SenderId,
    pub left: Digest,
    pub right: Digest,
}

/// Whether `descendant` equals `ancestor` or extends it along the chain.
pub fn extends<L: ChainLookup + ?Sized>(lookup: &L, descendant: Digest, ancestor: Digest) -> bool {
    if descendant == ancestor {
        return true;
    }
    let Some(target) = lookup.chain_record(&ancestor) else {
        return false;
    };

    let mut current = descendant;
    loop {
        let Some(record) = lookup.chain_record(&current) else {
            return false;
        };
        if record.sender != target.sender || record.seq <= target.seq {
            return false;
        }
        match record.own_prev {
            Some(prev) if prev == ancestor => return true,
            Some(prev) => current = prev,
            None => return false,
        }
    }
}

/// Merge the frontiers of a message's justification entries.
///
/// Returns the first pair of incomparable messages found for any sender.
pub fn merge_frontiers<'a, L, I>(
    lookup: &L,
    frontiers: I,
) -> Result<BTreeMap<SenderId, Digest>, ForkConflict>
where
    L: ChainLookup + ?Sized,
    I: IntoIterator<Item = &'a BTreeMap<SenderId, Digest>>,
{
    let mut merged: BTreeMap<SenderId, Digest> = BTreeMap::new();

    for frontier in frontiers {
        for (sender, &candidate) in frontier {
            let Some(&existing) = merged.get(sender) else {
                merged.insert(sender.clone(), candidate);
                continue;
            };

            if extends(lookup, existing, candidate) {
                continue;
            }
            if extends(lookup, candidate, existing) {
                merged.insert(sender.clone(), candidate);
                continue;
            }
            return Err(ForkConflict {
                sender: sender.clone(),
                left: existing,
                right: candidate,
            });
        }
    }

    Ok(merged)
}
