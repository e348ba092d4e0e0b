//! Generated-input checks of the participant invariants.

use crate::common::*;
use proptest::prelude::*;
use xaharness::Error;

/// One step a harness may take against the participant
#[derive(Debug, Clone)]
enum Step {
    SetFlag(bool),
    Capture,
    Check,
    VoteRollback,
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<bool>().prop_map(Step::SetFlag),
        Just(Step::Capture),
        Just(Step::Check),
        Just(Step::VoteRollback),
        Just(Step::Reset),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reset_clears_outcome_regardless_of_history(
        steps in prop::collection::vec(step(), 0..12),
        complete in any::<Option<bool>>(),
    ) {
        let harness = create_harness();
        let client = harness.client();
        let txn = client.begin().unwrap();

        for step in steps {
            match step {
                Step::SetFlag(flag) => client.set_rollback_only_before_completion(Some(txn), flag).unwrap(),
                Step::Capture => { client.same_transaction(Some(txn), true).unwrap(); }
                Step::Check => { let _ = client.same_transaction(Some(txn), false); }
                Step::VoteRollback => client.rollback_only(Some(txn)).unwrap(),
                Step::Reset => client.reset_status().unwrap(),
            }
        }
        match complete {
            Some(true) => { client.commit(txn).unwrap(); }
            Some(false) => client.rollback(txn).unwrap(),
            None => {}
        }

        client.reset_status().unwrap();
        prop_assert_eq!(client.commit_succeeded().unwrap(), None);
        prop_assert!(!client.is_before_completion().unwrap());
    }

    #[test]
    fn check_after_capture_matches_in_one_transaction(checks in 1usize..6) {
        let harness = create_harness();
        let client = harness.client();
        let txn = client.begin().unwrap();

        client.same_transaction(Some(txn), true).unwrap();
        for _ in 0..checks {
            let reply = client.same_transaction(Some(txn), false).unwrap();
            prop_assert!(reply.contains(&txn.to_string()));
        }
    }

    #[test]
    fn check_against_other_transaction_always_fails(capture_first in any::<bool>()) {
        let harness = create_harness();
        let client = harness.client();
        let captured = client.begin().unwrap();
        let other = client.begin().unwrap();

        if capture_first {
            client.same_transaction(Some(captured), true).unwrap();
        }
        let err: Error = client.same_transaction(Some(other), false).unwrap_err().into();
        prop_assert!(err.is_identity_mismatch());
    }

    #[test]
    fn outcome_unknown_until_post_completion(vote in any::<bool>(), explicit_rollback in any::<bool>()) {
        let harness = create_harness();
        let client = harness.client();
        let txn = client.begin().unwrap();

        client.set_rollback_only_before_completion(Some(txn), vote).unwrap();
        prop_assert_eq!(client.commit_succeeded().unwrap(), None);

        let expected = if explicit_rollback {
            client.rollback(txn).unwrap();
            false
        } else {
            client.commit(txn).unwrap()
        };
        prop_assert_eq!(client.commit_succeeded().unwrap(), Some(expected));
        prop_assert_eq!(expected, !vote && !explicit_rollback);
    }

    #[test]
    fn non_halt_fault_kinds_always_return(kind in "[A-Za-z0-9_]{0,12}") {
        prop_assume!(!kind.contains("HALT"));
        let harness = create_harness();
        let reply = harness.client().inject_fault(None, &kind).unwrap();
        prop_assert_eq!(reply, "fault injected on host node1.example.com");
    }
}
