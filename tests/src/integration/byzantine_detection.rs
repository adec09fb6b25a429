//! # Byzantine Detection Scenarios
//!
//! Histories in which a sender breaks the protocol, fed to an observer
//! engine named `Test` (weight 0, everybody else weight 1).
//!
//! ## Violations Covered
//!
//! 1. Omitting one's own previous message
//! 2. Citing a contradicting first message
//! 3. Double-citing one sender, directly and nested
//! 4. Forking one's own history, found at the top level and inside
//!    another sender's message
//! 5. Declaring an estimate the justification does not support

#[cfg(test)]
mod tests {
    use cbc_01_message_store::{MessageBody, MessageStore};
    use cbc_02_validation::{ParseOutcome, Violation};
    use shared_types::{Estimate, SenderId};

    use crate::fixtures::{observer, zero, Engine};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn sender(name: &str) -> SenderId {
        SenderId::from(name)
    }

    fn rejected(engine: &Engine, digest: &shared_types::Digest) -> Violation {
        match engine.parse_msg(digest).expect("store is well formed") {
            ParseOutcome::Rejected(violation) => violation,
            ParseOutcome::Accepted => panic!("{} should have been rejected", digest.short()),
        }
    }

    /// Brian's history four links deep; `witness` is cited by the third link.
    ///
    /// ```text
    /// Brian ─┬─ Fred
    ///        └─ Brian ─┬─ <witness>
    ///                  └─ Brian ─┬─ Donna
    ///                            └─ Brian ─┬─ Brian (genesis)
    ///                                      └─ Sally
    /// ```
    fn brian_history(witness: &str) -> MessageBody {
        let first = zero("Brian").cite(zero("Brian")).cite(zero("Sally"));
        let second = zero("Brian").cite(zero("Donna")).cite(first);
        let third = zero("Brian").cite(zero(witness)).cite(second);
        zero("Brian").cite(zero("Fred")).cite(third)
    }

    // =============================================================================
    // SENDER CONTINUITY
    // =============================================================================

    #[test]
    fn test_flags_sender_omitting_own_message() {
        let (store, engine) = observer();

        let msg1 = store.store(zero("Brian"));
        let msg2 = store.store(zero("Brian").cite(zero("Zebra")).cite(zero("Sally")));

        assert!(engine.parse_msg(&msg1).unwrap().is_accepted());
        assert_eq!(engine.latest_message(&sender("Brian")), Some(msg1));

        let violation = rejected(&engine, &msg2);

        assert!(matches!(violation, Violation::MissingOwnPriorCitation { .. }));
        assert_eq!(engine.latest_message(&sender("Brian")), Some(msg1));
        assert!(engine.is_byzantine(&sender("Brian")));
    }

    #[test]
    fn test_flags_contradicting_initial_message() {
        let (store, engine) = observer();

        let msg1 = store.store(zero("Brian"));
        let contradiction = MessageBody::genesis("Brian", Estimate::One);
        let msg2 = store.store(zero("Brian").cite(contradiction.clone()).cite(zero("Sally")));

        engine.parse_msg(&msg1).unwrap();
        let violation = rejected(&engine, &msg2);

        // Blamed on the nested first message, which ignores msg1
        assert_eq!(violation.message(), store.store(contradiction));
        assert_eq!(violation.culprit(), Some(&sender("Brian")));
        assert_eq!(engine.latest_message(&sender("Brian")), Some(msg1));
        assert!(engine.is_byzantine(&sender("Brian")));
    }

    // =============================================================================
    // SIBLING UNIQUENESS
    // =============================================================================

    #[test]
    fn test_flags_double_citation() {
        let (store, engine) = observer();

        let msg1 = store.store(zero("Brian"));
        let msg2 = store.store(
            zero("Brian")
                .cite(zero("Brian"))
                .cite(zero("Sally"))
                .cite(zero("Brian")),
        );

        engine.parse_msg(&msg1).unwrap();
        let violation = rejected(&engine, &msg2);

        assert!(matches!(
            violation,
            Violation::SiblingDuplicateSender { ref duplicated, .. } if duplicated == &sender("Brian")
        ));
        assert!(engine.is_byzantine(&sender("Brian")));
        assert_eq!(engine.latest_message(&sender("Brian")), Some(msg1));
    }

    #[test]
    fn test_flags_double_citation_deep_in_history() {
        let (store, engine) = observer();

        let msg1 = store.store(zero("Brian"));
        let msg2 = store.store(
            zero("Brian")
                .cite(zero("Brian"))
                .cite(zero("Sally").cite(zero("Andy")).cite(zero("Andy"))),
        );

        engine.parse_msg(&msg1).unwrap();
        let violation = rejected(&engine, &msg2);

        assert_eq!(violation.culprit(), Some(&sender("Sally")));
        assert!(engine.is_byzantine(&sender("Sally")));
        assert!(!engine.is_byzantine(&sender("Brian")));
        assert_eq!(engine.latest_message(&sender("Brian")), Some(msg1));
        assert_eq!(engine.latest_message(&sender("Sally")), None);
    }

    // =============================================================================
    // FORKED HISTORIES
    // =============================================================================

    #[test]
    fn test_flags_sender_forking_own_history() {
        let (store, engine) = observer();

        let msg1 = store.store(brian_history("Eddy"));
        let msg2 = store.store(brian_history("Xena"));

        assert!(engine.parse_msg(&msg1).unwrap().is_accepted());
        assert_eq!(engine.latest_message(&sender("Brian")), Some(msg1));

        let violation = rejected(&engine, &msg2);

        assert!(matches!(
            violation,
            Violation::CitationEquivocation { expected, .. } if expected == msg1
        ));
        assert_eq!(engine.latest_message(&sender("Brian")), Some(msg1));
        assert!(engine.is_byzantine(&sender("Brian")));
        assert!(!engine.is_byzantine(&sender("Xena")));
    }

    #[test]
    fn test_flags_fork_in_another_senders_history() {
        let (store, engine) = observer();

        let msg1 = store.store(zero("Graham").cite(zero("Graham")).cite(brian_history("Eddy")));
        let msg2 = store.store(zero("Graham").cite(msg1).cite(brian_history("Zebra")));

        assert!(engine.parse_msg(&msg1).unwrap().is_accepted());
        assert_eq!(engine.latest_message(&sender("Graham")), Some(msg1));

        let violation = rejected(&engine, &msg2);

        assert_eq!(violation.culprit(), Some(&sender("Brian")));
        assert_eq!(engine.latest_message(&sender("Graham")), Some(msg1));
        assert!(engine.is_byzantine(&sender("Brian")));
        assert!(!engine.is_byzantine(&sender("Graham")));
    }

    // =============================================================================
    // ESTIMATE
    // =============================================================================

    #[test]
    fn test_flags_incorrect_estimate() {
        let (store, engine) = observer();

        let msg = store.store(
            MessageBody::genesis("Brian", Estimate::One)
                .cite(zero("Zebra"))
                .cite(zero("Sally"))
                .cite(MessageBody::genesis("Brian", Estimate::One)),
        );

        let violation = rejected(&engine, &msg);

        assert!(matches!(
            violation,
            Violation::EstimateMismatch {
                declared: Estimate::One,
                expected: Estimate::Zero,
                ..
            }
        ));
        assert!(engine.is_byzantine(&sender("Brian")));
        assert_eq!(engine.latest_message(&sender("Brian")), None);
    }

    #[test]
    fn test_flags_survive_later_valid_messages() {
        let (store, engine) = observer();

        let msg1 = store.store(zero("Brian"));
        let bad = store.store(zero("Brian").cite(zero("Zebra")));
        let good = store.store(zero("Brian").cite(msg1));

        engine.parse_msg(&msg1).unwrap();
        rejected(&engine, &bad);
        assert!(engine.parse_msg(&good).unwrap().is_accepted());

        assert_eq!(engine.latest_message(&sender("Brian")), Some(good));
        assert!(engine.is_byzantine(&sender("Brian")));
    }
}
