//! Full enlistment scenarios.

use crate::common::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use xaharness::{Error, TransactionStatus};

#[test]
fn commit_reaches_participant() {
    let harness = create_harness();
    let client = harness.client();

    let txn = client.begin().unwrap();
    client.same_transaction(Some(txn), true).unwrap();
    assert!(!client.is_before_completion().unwrap());
    assert_eq!(client.commit_succeeded().unwrap(), None);

    assert!(client.commit(txn).unwrap());

    assert_eq!(client.commit_succeeded().unwrap(), Some(true));
    assert!(client.is_before_completion().unwrap());
}

#[test]
fn deferred_rollback_vote_forces_rollback() {
    let harness = create_harness();
    let client = harness.client();
    let participant = harness.participant();

    let txn = client.begin().unwrap();
    client.set_rollback_only_before_completion(Some(txn), true).unwrap();
    assert_eq!(
        client.transaction_status(Some(txn)).unwrap(),
        TransactionStatus::Active
    );

    // Drive the hook directly to observe the vote before the decision.
    let handle = harness.manager().lookup(&txn).unwrap();
    xaharness::Synchronization::before_completion(&**participant, &handle).unwrap();
    assert_eq!(handle.status(), TransactionStatus::MarkedRollback);

    assert!(!client.commit(txn).unwrap());
    assert_eq!(client.commit_succeeded().unwrap(), Some(false));
    assert_eq!(harness.metrics().transactions_rolled_back, 1);
}

#[test]
fn rollback_only_without_transaction_fails() {
    let harness = create_harness();

    let err: Error = harness.client().rollback_only(None).unwrap_err().into();
    assert!(err.is_no_transaction());
}

#[test]
fn rollback_only_is_immediate() {
    let harness = create_harness();
    let client = harness.client();

    let txn = client.begin().unwrap();
    client.rollback_only(Some(txn)).unwrap();
    assert_eq!(
        client.transaction_status(Some(txn)).unwrap(),
        TransactionStatus::MarkedRollback
    );
    assert!(!client.commit(txn).unwrap());
    assert_eq!(client.commit_succeeded().unwrap(), Some(false));
    assert!(client.is_before_completion().unwrap());
}

#[test]
fn explicit_rollback_skips_pre_completion() {
    let harness = create_harness();
    let client = harness.client();

    let txn = client.begin().unwrap();
    client.same_transaction(Some(txn), true).unwrap();
    client.rollback(txn).unwrap();

    assert_eq!(client.commit_succeeded().unwrap(), Some(false));
    assert!(!client.is_before_completion().unwrap());
}

#[test]
fn second_check_before_first_fails_loudly() {
    let harness = create_harness();
    let client = harness.client();

    let txn = client.begin().unwrap();
    let err: Error = client.same_transaction(Some(txn), false).unwrap_err().into();
    assert!(err.is_identity_mismatch());
}

#[test]
fn multiplexed_transactions_are_detected() {
    let harness = create_harness();
    let client = harness.client();

    let first = client.begin().unwrap();
    let second = client.begin().unwrap();
    client.same_transaction(Some(first), true).unwrap();

    let err: Error = client
        .same_transaction(Some(second), false)
        .unwrap_err()
        .into();
    assert!(err.is_identity_mismatch());
    assert_eq!(harness.metrics().transactions_active, 2);
}

#[test]
fn reuse_after_reset() {
    let harness = create_harness();
    let client = harness.client();

    let t1 = client.begin().unwrap();
    client.same_transaction(Some(t1), true).unwrap();
    client.rollback_only(Some(t1)).unwrap();
    assert!(!client.commit(t1).unwrap());
    assert_eq!(client.commit_succeeded().unwrap(), Some(false));

    client.reset_status().unwrap();
    assert_eq!(client.commit_succeeded().unwrap(), None);
    assert!(!client.is_before_completion().unwrap());

    let t2 = client.begin().unwrap();
    client.same_transaction(Some(t2), true).unwrap();
    client.same_transaction(Some(t2), false).unwrap();
    assert!(client.commit(t2).unwrap());
    assert_eq!(client.commit_succeeded().unwrap(), Some(true));

    let metrics = harness.metrics();
    assert_eq!(metrics.transactions_committed, 1);
    assert_eq!(metrics.transactions_rolled_back, 1);
    assert_eq!(metrics.transactions_active, 0);
}

#[test]
fn stale_transaction_key_is_rejected() {
    let harness = create_harness();
    let client = harness.client();

    let txn = client.begin().unwrap();
    client.commit(txn).unwrap();

    let err: Error = client.same_transaction(Some(txn), true).unwrap_err().into();
    assert_eq!(err, Error::TransactionNotFound(txn.to_string()));
}

#[test]
fn non_halt_fault_names_host() {
    let harness = create_harness();
    let reply = harness.client().inject_fault(None, "OTHER").unwrap();
    assert_eq!(reply, "fault injected on host node1.example.com");
}

#[test]
fn halt_fault_never_returns_to_caller() {
    let harness = create_harness();
    let client = harness.client();
    let txn = client.begin().unwrap();
    client.same_transaction(Some(txn), true).unwrap();

    let result = catch_unwind(AssertUnwindSafe(|| {
        client.inject_fault(Some(txn), "HALT_MID_TRANSACTION")
    }));
    assert!(result.is_err());

    // The transaction is left for the coordinator to resolve.
    assert_eq!(harness.metrics().transactions_active, 1);
    assert_eq!(client.commit_succeeded().unwrap(), None);
}
