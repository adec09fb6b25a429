//! One `parse_msg` traversal.
//!
//! A [`Pass`] walks the justification closure of a root digest with an
//! explicit stack, children before parents. Valid verdicts and latest-message
//! updates are staged and only committed if the root is accepted; invalid
//! verdicts and Byzantine flags go straight into the engine state.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use cbc_01_message_store::{Message, MessageStore};
use shared_types::{Digest, SenderId};
use tracing::{debug, warn};

use super::state::{EngineState, Verdict};
use super::ValidationEngine;
use crate::domain::chain::{self, ChainLookup, ChainRecord};
use crate::domain::{MalformedReason, ValidationError, ValidationResult, Violation};
use crate::metrics;
use crate::ports::WeightProvider;

/// A message whose justification entries are being resolved.
struct Frame {
    digest: Digest,
    message: Arc<Message>,
    /// Index of the next justification entry to resolve
    next: usize,
    /// Records of the entries resolved so far, in justification order
    cited: Vec<(Digest, Arc<ChainRecord>)>,
}

impl Frame {
    fn pending(&self) -> Option<Digest> {
        self.message.justification.get(self.next).copied()
    }
}

/// Result of looking at a digest for the first time in a pass.
enum Step {
    Known(Result<Arc<ChainRecord>, Violation>),
    Missing,
    Enter(Frame),
}

pub(super) struct Pass<'a, S: MessageStore, W: WeightProvider> {
    engine: &'a ValidationEngine<S, W>,
    state: &'a mut EngineState,
    staged_valid: HashMap<Digest, Arc<ChainRecord>>,
    staged_latest: HashMap<SenderId, Digest>,
    in_progress: HashSet<Digest>,
    flagged: BTreeSet<SenderId>,
}

impl<'a, S: MessageStore, W: WeightProvider> Pass<'a, S, W> {
    pub(super) fn new(engine: &'a ValidationEngine<S, W>, state: &'a mut EngineState) -> Self {
        Self {
            engine,
            state,
            staged_valid: HashMap::new(),
            staged_latest: HashMap::new(),
            in_progress: HashSet::new(),
            flagged: BTreeSet::new(),
        }
    }

    /// Senders newly flagged during this pass.
    pub(super) fn flagged(&self) -> &BTreeSet<SenderId> {
        &self.flagged
    }

    /// Validate `root` and its closure.
    ///
    /// Commits the staged verdicts when the root is accepted. The outer
    /// `Err` is a store contract violation and aborts the pass.
    pub(super) fn run(&mut self, root: Digest) -> ValidationResult<Result<(), Violation>> {
        let mut stack = match self.step_into(root)? {
            Step::Known(known) => return Ok(known.map(|_| ())),
            Step::Missing => {
                return Ok(Err(Violation::MalformedJustification {
                    message: root,
                    reference: root,
                    reason: MalformedReason::Dangling,
                }))
            }
            Step::Enter(frame) => vec![frame],
        };

        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.pending() {
                frame.next += 1;
                let parent = frame.digest;

                if self.in_progress.contains(&child) {
                    let violation = Violation::MalformedJustification {
                        message: parent,
                        reference: child,
                        reason: MalformedReason::Cyclic,
                    };
                    return Ok(Err(self.unwind(stack, violation)));
                }

                match self.step_into(child)? {
                    Step::Known(Ok(record)) => frame.cited.push((child, record)),
                    Step::Known(Err(violation)) => return Ok(Err(self.unwind(stack, violation))),
                    Step::Missing => {
                        let violation = Violation::MalformedJustification {
                            message: parent,
                            reference: child,
                            reason: MalformedReason::Dangling,
                        };
                        return Ok(Err(self.unwind(stack, violation)));
                    }
                    Step::Enter(next) => stack.push(next),
                }
                continue;
            }

            // Every entry resolved: judge the message itself.
            let Some(frame) = stack.pop() else { break };
            self.in_progress.remove(&frame.digest);

            match self.check(&frame) {
                Ok(record) => {
                    self.stage(frame.digest, record.clone());
                    match stack.last_mut() {
                        Some(parent) => parent.cited.push((frame.digest, record)),
                        None => {
                            self.commit();
                            return Ok(Ok(()));
                        }
                    }
                }
                Err(violation) => {
                    self.reject(frame.digest, violation.clone());
                    return Ok(Err(self.unwind(stack, violation)));
                }
            }
        }

        Ok(Ok(()))
    }

    /// Memoized outcome of `digest`, staged verdicts first.
    fn known(&self, digest: &Digest) -> Option<Result<Arc<ChainRecord>, Violation>> {
        if let Some(record) = self.staged_valid.get(digest) {
            return Some(Ok(record.clone()));
        }
        match self.state.verdicts.get(digest)? {
            Verdict::Valid(record) => Some(Ok(record.clone())),
            Verdict::Invalid(violation) => Some(Err(violation.clone())),
        }
    }

    fn step_into(&mut self, digest: Digest) -> ValidationResult<Step> {
        if let Some(known) = self.known(&digest) {
            return Ok(Step::Known(known));
        }

        let Ok(message) = self.engine.store.retrieve(&digest) else {
            return Ok(Step::Missing);
        };

        if self.engine.config.verify_digests {
            let actual = message.digest();
            if actual != digest {
                return Err(ValidationError::StoreCorruption {
                    requested: digest,
                    actual,
                });
            }
        }

        if self.engine.config.reject_flagged_senders
            && self.state.byzantine.contains(&message.sender)
        {
            let violation = Violation::FlaggedSender {
                message: digest,
                sender: message.sender.clone(),
            };
            self.reject(digest, violation.clone());
            return Ok(Step::Known(Err(violation)));
        }

        self.in_progress.insert(digest);
        Ok(Step::Enter(Frame {
            digest,
            cited: Vec::with_capacity(message.justification.len()),
            message,
            next: 0,
        }))
    }

    /// Latest message of `sender` as seen by this pass.
    fn latest(&self, sender: &SenderId) -> Option<Digest> {
        self.staged_latest
            .get(sender)
            .or_else(|| self.state.latest.get(sender))
            .copied()
    }

    /// Run the per-message checks once every justification entry is valid.
    fn check(&self, frame: &Frame) -> Result<Arc<ChainRecord>, Violation> {
        let digest = frame.digest;
        let sender = &frame.message.sender;

        // Sibling uniqueness
        let mut seen: HashMap<&SenderId, Digest> = HashMap::with_capacity(frame.cited.len());
        for (cited, record) in &frame.cited {
            if let Some(&first) = seen.get(&record.sender) {
                return Err(Violation::SiblingDuplicateSender {
                    message: digest,
                    author: sender.clone(),
                    duplicated: record.sender.clone(),
                    first,
                    second: *cited,
                });
            }
            seen.insert(&record.sender, *cited);
        }

        // Sender continuity
        let own = frame
            .cited
            .iter()
            .find(|(_, record)| &record.sender == sender);
        if let Some(expected) = self.latest(sender) {
            match own {
                None => {
                    return Err(Violation::MissingOwnPriorCitation {
                        message: digest,
                        sender: sender.clone(),
                        expected,
                    })
                }
                Some((cited, _)) if *cited != expected => {
                    return Err(Violation::CitationEquivocation {
                        message: digest,
                        sender: sender.clone(),
                        expected,
                        cited: *cited,
                    })
                }
                Some(_) => {}
            }
        }

        // Transitive fork-freedom
        let frontier = chain::merge_frontiers(self, frame.cited.iter().map(|(_, r)| &r.frontier))
            .map_err(|conflict| Violation::TransitiveForkDetected {
                message: digest,
                sender: conflict.sender,
                left: conflict.left,
                right: conflict.right,
            })?;

        // Estimate
        if !frame.cited.is_empty() {
            let expected = self.engine.estimator.estimate(
                frame
                    .cited
                    .iter()
                    .map(|(_, r)| (r.estimate, self.engine.weight_for(&r.sender))),
            );
            if expected != frame.message.estimate {
                return Err(Violation::EstimateMismatch {
                    message: digest,
                    sender: sender.clone(),
                    declared: frame.message.estimate,
                    expected,
                });
            }
        }

        Ok(Arc::new(ChainRecord::new(
            digest,
            sender.clone(),
            frame.message.estimate,
            own.map(|(d, r)| (*d, r.as_ref())),
            frontier,
        )))
    }

    fn stage(&mut self, digest: Digest, record: Arc<ChainRecord>) {
        self.staged_latest.insert(record.sender.clone(), digest);
        self.staged_valid.insert(digest, record);
    }

    fn commit(&mut self) {
        let staged_latest = std::mem::take(&mut self.staged_latest);
        let staged_valid = std::mem::take(&mut self.staged_valid);

        for (digest, record) in staged_valid {
            debug!(
                "[cbc-02] Accepted {} from {} (seq {})",
                digest.short(),
                record.sender,
                record.seq
            );
            self.state.verdicts.insert(digest, Verdict::Valid(record));
            self.state.validated += 1;
        }
        self.state.latest.extend(staged_latest);
    }

    /// Memoize `digest` as invalid and flag the senders the violation names.
    fn reject(&mut self, digest: Digest, violation: Violation) {
        for sender in violation.byzantine_senders() {
            if self.state.byzantine.insert(sender.clone()) {
                warn!(
                    "[cbc-02] ⚠️ {} flagged Byzantine: {}",
                    sender,
                    violation.kind()
                );
                metrics::record_byzantine_flagged();
                self.flagged.insert(sender.clone());
            }
        }
        self.memoize_invalid(digest, violation);
    }

    fn memoize_invalid(&mut self, digest: Digest, violation: Violation) {
        if violation.is_transient() {
            return;
        }
        if self
            .state
            .verdicts
            .insert(digest, Verdict::Invalid(violation))
            .is_none()
        {
            self.state.rejected += 1;
        }
    }

    /// Invalidate every message still on the path with the inner violation.
    fn unwind(&mut self, stack: Vec<Frame>, violation: Violation) -> Violation {
        for frame in stack.into_iter().rev() {
            self.in_progress.remove(&frame.digest);
            self.memoize_invalid(frame.digest, violation.clone());
        }
        violation
    }
}

impl<S: MessageStore, W: WeightProvider> ChainLookup for Pass<'_, S, W> {
    fn chain_record(&self, digest: &Digest) -> Option<Arc<ChainRecord>> {
        self.known(digest).and_then(Result::ok)
    }
}
