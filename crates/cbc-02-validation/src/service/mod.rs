//! Validation Service - Core business logic
//!
//! # Architecture
//! - One mutex per engine guards the latest-message table, the Byzantine set
//!   and the verdict memo, so `parse_msg` calls on one engine serialize
//! - The store is shared and only read during validation
//! - Each `parse_msg` call runs one [`pass::Pass`] over the closure

mod pass;
mod state;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use cbc_01_message_store::{Message, MessageStore};
use parking_lot::Mutex;
use shared_types::{Digest, Estimate, SenderId, Weight};
use tracing::{debug, info};

use crate::adapters::StaticWeightTable;
use crate::domain::{
    BinaryEstimator, EngineStats, MessageStatus, ParseOutcome, Proposal, ValidationConfig,
    ValidationResult,
};
use crate::metrics;
use crate::ports::{ValidationApi, WeightProvider};

use pass::Pass;
use state::EngineState;

/// Validation Engine
///
/// Replays an incoming message stream for the validator `name`, tracking
/// the latest valid message and the Byzantine flag of every sender.
pub struct ValidationEngine<S, W>
where
    S: MessageStore,
    W: WeightProvider,
{
    name: SenderId,
    initial_estimate: Estimate,
    weight: Weight,
    store: Arc<S>,
    weights: Arc<W>,
    config: ValidationConfig,
    estimator: BinaryEstimator,
    state: Mutex<EngineState>,
}

impl<S> ValidationEngine<S, StaticWeightTable>
where
    S: MessageStore,
{
    /// Engine where every other sender weighs 1, with default config.
    pub fn with_uniform_weights(
        name: impl Into<SenderId>,
        initial_estimate: Estimate,
        weight: Weight,
        store: Arc<S>,
    ) -> Self {
        Self::new(
            name,
            initial_estimate,
            weight,
            store,
            Arc::new(StaticWeightTable::uniform(1)),
            ValidationConfig::default(),
        )
    }
}

impl<S, W> ValidationEngine<S, W>
where
    S: MessageStore,
    W: WeightProvider,
{
    pub fn new(
        name: impl Into<SenderId>,
        initial_estimate: Estimate,
        weight: Weight,
        store: Arc<S>,
        weights: Arc<W>,
        config: ValidationConfig,
    ) -> Self {
        Self {
            name: name.into(),
            initial_estimate,
            weight,
            store,
            weights,
            estimator: BinaryEstimator::new(config.tie_break),
            config,
            state: Mutex::new(EngineState::default()),
        }
    }

    pub fn name(&self) -> &SenderId {
        &self.name
    }

    pub fn initial_estimate(&self) -> Estimate {
        self.initial_estimate
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Estimator weight of `sender`; the engine's own weight for its own name.
    fn weight_for(&self, sender: &SenderId) -> Weight {
        if sender == &self.name {
            self.weight
        } else {
            self.weights.weight_of(sender)
        }
    }

    // === VALIDATION ===

    /// Validate the message at `digest` and, transitively, its justification.
    ///
    /// Messages already judged in this engine's lifetime short-circuit to
    /// their memoized outcome. Latest-message updates happen only when the
    /// root message is accepted; Byzantine flags persist either way.
    pub fn parse_msg(&self, digest: &Digest) -> ValidationResult<ParseOutcome> {
        let started = Instant::now();
        let mut state = self.state.lock();

        let mut pass = Pass::new(self, &mut state);
        let result = pass.run(*digest)?;
        let flagged = pass.flagged().len();

        metrics::record_validation_latency(started.elapsed().as_secs_f64());

        match &result {
            Ok(()) => {
                debug!("[cbc-02] Message {} accepted", digest.short());
                metrics::record_message_accepted();
            }
            Err(violation) => {
                info!(
                    "[cbc-02] Message {} rejected ({} new Byzantine): {}",
                    digest.short(),
                    flagged,
                    violation
                );
                metrics::record_message_rejected(violation.kind());
            }
        }

        Ok(result.into())
    }

    // === QUERIES ===

    /// Latest valid message from `sender` (`getLatestMsgHash`).
    pub fn latest_message(&self, sender: &SenderId) -> Option<Digest> {
        self.state.lock().latest.get(sender).copied()
    }

    pub fn is_byzantine(&self, sender: &SenderId) -> bool {
        self.state.lock().byzantine.contains(sender)
    }

    pub fn latest_messages(&self) -> BTreeMap<SenderId, Digest> {
        self.state.lock().latest.clone()
    }

    pub fn byzantine_senders(&self) -> BTreeSet<SenderId> {
        self.state.lock().byzantine.clone()
    }

    pub fn message_status(&self, digest: &Digest) -> MessageStatus {
        self.state.lock().status(digest)
    }

    pub fn stats(&self) -> EngineStats {
        let state = self.state.lock();
        EngineStats {
            validated: state.validated,
            rejected: state.rejected,
            byzantine: state.byzantine.len(),
            senders: state.latest.len(),
        }
    }

    /// Weighted-majority estimate over the latest messages of honest senders.
    ///
    /// Falls back to the initial estimate before any such message exists.
    pub fn current_estimate(&self) -> Estimate {
        let state = self.state.lock();
        self.estimate_over(&state, &self.honest_frontier(&state))
    }

    // === PROPOSAL ===

    /// Build this validator's next message and run it through `parse_msg`.
    ///
    /// The justification cites the latest message of every honest sender.
    pub fn propose(&self) -> ValidationResult<Proposal> {
        let message = {
            let state = self.state.lock();
            let justification = self.honest_frontier(&state);
            let estimate = self.estimate_over(&state, &justification);
            Message::new(self.name.clone(), estimate, justification)
        };

        let digest = self.store.insert(message);
        let outcome = self.parse_msg(&digest)?;

        info!(
            "[cbc-02] Proposed {} as {} (accepted: {})",
            digest.short(),
            self.name,
            outcome.is_accepted()
        );

        Ok(Proposal { digest, outcome })
    }

    fn honest_frontier(&self, state: &EngineState) -> Vec<Digest> {
        state
            .honest_latest()
            .map(|(_, digest)| *digest)
            .collect()
    }

    fn estimate_over(&self, state: &EngineState, cited: &[Digest]) -> Estimate {
        let votes: Vec<_> = cited
            .iter()
            .filter_map(|digest| state.record(digest))
            .map(|record| (record.estimate, self.weight_for(&record.sender)))
            .collect();

        if votes.is_empty() {
            return self.initial_estimate;
        }
        self.estimator.estimate(votes)
    }
}

impl<S, W> ValidationApi for ValidationEngine<S, W>
where
    S: MessageStore,
    W: WeightProvider,
{
    fn parse_msg(&self, digest: &Digest) -> ValidationResult<ParseOutcome> {
        ValidationEngine::parse_msg(self, digest)
    }

    fn latest_message(&self, sender: &SenderId) -> Option<Digest> {
        ValidationEngine::latest_message(self, sender)
    }

    fn is_byzantine(&self, sender: &SenderId) -> bool {
        ValidationEngine::is_byzantine(self, sender)
    }

    fn latest_messages(&self) -> BTreeMap<SenderId, Digest> {
        ValidationEngine::latest_messages(self)
    }

    fn byzantine_senders(&self) -> BTreeSet<SenderId> {
        ValidationEngine::byzantine_senders(self)
    }
}
