//! Participant notifications seen alongside other synchronizations.

use crate::common::*;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use xaharness::{Synchronization, Transaction, TransactionStatus};

/// Records the participant's visible state at each notification
#[derive(Default)]
struct Observer {
    seen: Mutex<Vec<(String, TransactionStatus)>>,
}

impl Synchronization for Observer {
    fn before_completion(&self, txn: &Transaction) -> xa_core::Result<()> {
        self.seen.lock().push(("before".into(), txn.status()));
        Ok(())
    }

    fn after_completion(&self, txn: &Transaction, committed: bool) {
        self.seen
            .lock()
            .push((format!("after:{}", committed), txn.status()));
    }
}

#[test]
fn participant_vote_precedes_later_observers() {
    let harness = create_harness();
    let client = harness.client();
    let txn = client.begin().unwrap();

    client.set_rollback_only_before_completion(Some(txn), true).unwrap();
    let handle = harness.manager().lookup(&txn).unwrap();
    let observer = Arc::new(Observer::default());
    handle.register_synchronization(observer.clone()).unwrap();

    assert!(!client.commit(txn).unwrap());

    let seen = observer.seen.lock().clone();
    assert_eq!(
        seen,
        vec![
            ("before".to_string(), TransactionStatus::MarkedRollback),
            ("after:false".to_string(), TransactionStatus::RolledBack),
        ]
    );
}

#[test]
fn participant_enlists_once_per_transaction() {
    let harness = create_harness();
    let client = harness.client();
    let txn = client.begin().unwrap();

    client.same_transaction(Some(txn), true).unwrap();
    client.same_transaction(Some(txn), false).unwrap();
    client.set_rollback_only_before_completion(Some(txn), false).unwrap();
    client.inject_fault(Some(txn), "OTHER").unwrap();

    let handle = harness.manager().lookup(&txn).unwrap();
    assert_eq!(handle.synchronization_count(), 1);
}

#[test]
fn concurrent_queries_see_consistent_state() {
    let harness = Arc::new(create_harness());
    let txn = harness.client().begin().unwrap();
    harness.client().same_transaction(Some(txn), true).unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let harness = Arc::clone(&harness);
            thread::spawn(move || {
                for _ in 0..100 {
                    let outcome = harness.client().commit_succeeded().unwrap();
                    let before = harness.client().is_before_completion().unwrap();
                    // An outcome from commit() always follows the pre-completion hook.
                    if outcome == Some(true) {
                        assert!(before);
                    }
                    harness.client().same_transaction(Some(txn), false).ok();
                }
            })
        })
        .collect();

    assert!(harness.client().commit(txn).unwrap());
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(harness.client().commit_succeeded().unwrap(), Some(true));
}
