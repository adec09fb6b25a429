//! # Integration Test Flows
//!
//! Honest validators exchanging messages through one shared store.
//!
//! ## Flows Tested
//!
//! 1. **Propose → parse**: one engine's proposals validate on another engine
//! 2. **Long histories**: thousands of interleaved messages in one call
//! 3. **Wide justifications**: one message citing hundreds of senders
//! 4. **Isolation**: engines over one store never share state

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cbc_01_message_store::{InMemoryMessageStore, MessageStore};
    use cbc_02_validation::{
        MessageStatus, StaticWeightTable, ValidationApi, ValidationConfig, ValidationEngine,
    };
    use shared_types::{Estimate, SenderId};

    use crate::fixtures::{
        init_test_logging, interleaved_history, observer, wide_justification, zero, Engine,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn validator(name: &str, initial: Estimate, store: &Arc<InMemoryMessageStore>) -> Engine {
        init_test_logging();
        ValidationEngine::new(
            name,
            initial,
            1,
            store.clone(),
            Arc::new(StaticWeightTable::uniform(1)),
            ValidationConfig::default(),
        )
    }

    // =============================================================================
    // PROPOSE → PARSE
    // =============================================================================

    #[test]
    fn test_proposals_validate_on_peers() {
        let store = Arc::new(InMemoryMessageStore::new());
        let alice = validator("Alice", Estimate::One, &store);
        let bob = validator("Bob", Estimate::Zero, &store);

        let a0 = alice.propose().unwrap();
        assert!(a0.outcome.is_accepted());
        assert!(bob.parse_msg(&a0.digest).unwrap().is_accepted());

        // Bob adopts Alice's estimate, the only one he has seen
        let b0 = bob.propose().unwrap();
        assert!(b0.outcome.is_accepted());
        assert_eq!(store.retrieve(&b0.digest).unwrap().estimate, Estimate::One);
        assert!(alice.parse_msg(&b0.digest).unwrap().is_accepted());

        let a1 = alice.propose().unwrap();
        assert!(a1.outcome.is_accepted());
        assert_eq!(
            store.retrieve(&a1.digest).unwrap().justification,
            vec![a0.digest, b0.digest]
        );
        assert!(bob.parse_msg(&a1.digest).unwrap().is_accepted());

        assert_eq!(alice.latest_messages(), bob.latest_messages());
        assert!(alice.byzantine_senders().is_empty());
        assert!(bob.byzantine_senders().is_empty());
    }

    #[test]
    fn test_consumers_read_through_api() {
        let (store, engine) = observer();
        let msg = store.store(zero("Brian").cite(zero("Sally")));
        engine.parse_msg(&msg).unwrap();

        let api: Arc<dyn ValidationApi> = Arc::new(engine);
        let latest = api.latest_messages();

        assert_eq!(latest.len(), 2);
        assert_eq!(latest.get(&SenderId::from("Brian")), Some(&msg));
        assert!(!api.is_byzantine(&SenderId::from("Sally")));
    }

    // =============================================================================
    // LONG HISTORIES
    // =============================================================================

    #[test]
    fn test_long_interleaved_history_in_one_call() {
        let (store, engine) = observer();
        let rounds = 5_000;
        let (brian, sally) = interleaved_history(store.as_ref(), "Brian", "Sally", rounds);

        assert!(engine.parse_msg(&brian).unwrap().is_accepted());
        assert!(engine.parse_msg(&sally).unwrap().is_accepted());

        assert_eq!(engine.latest_message(&SenderId::from("Brian")), Some(brian));
        assert_eq!(engine.latest_message(&SenderId::from("Sally")), Some(sally));
        assert_eq!(engine.stats().validated, 2 * (rounds as u64 + 1));
    }

    // =============================================================================
    // WIDE JUSTIFICATIONS
    // =============================================================================

    #[test]
    fn test_wide_justification() {
        let (store, engine) = observer();
        let digest = wide_justification(store.as_ref(), "Brian", 500);

        assert!(engine.parse_msg(&digest).unwrap().is_accepted());
        assert_eq!(engine.stats().senders, 501);
        assert_eq!(store.len(), 501);
    }

    // =============================================================================
    // ISOLATION
    // =============================================================================

    #[test]
    fn test_engines_do_not_share_state() {
        let (store, first) = observer();
        let second = ValidationEngine::with_uniform_weights("Other", Estimate::Zero, 0, store.clone());

        let msg1 = store.store(zero("Brian"));
        let bad = store.store(zero("Brian").cite(zero("Zebra")));
        first.parse_msg(&msg1).unwrap();
        first.parse_msg(&bad).unwrap();

        assert!(first.is_byzantine(&SenderId::from("Brian")));
        assert!(!second.is_byzantine(&SenderId::from("Brian")));
        assert_eq!(second.message_status(&msg1), MessageStatus::Unseen);

        // The second engine never saw msg1, so bad is Brian's first message there
        assert!(second.parse_msg(&bad).unwrap().is_accepted());
    }
}
