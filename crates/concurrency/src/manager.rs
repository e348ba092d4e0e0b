//! Transaction manager for driving completion notifications
//!
//! Provides an in-process coordinator that:
//! 1. Begins transactions and keeps the live ones addressable by key
//! 2. Runs the pre-completion notifications (last chance to vote rollback)
//! 3. Decides the outcome and runs the post-completion notifications
//!
//! ## Commit Sequence
//!
//! ```text
//! 1. Acquire commit lock
//! 2. Check transaction is open (Active or MarkedRollback)
//! 3. before_completion() on every synchronization, in registration order
//!    - an Err from a hook marks the transaction rollback-only
//!    - synchronizations registered by a hook are notified too
//! 4. Decide under the transaction lock: rollback-only => RollingBack,
//!    otherwise Committing. Later votes and registrations are rejected.
//! 5. Set final status (Committed or RolledBack), drop from live registry
//! 6. after_completion(committed) on every synchronization, exactly once
//! 7. Return committed flag
//! ```
//!
//! Rollback skips step 3: synchronizations see only `after_completion(false)`.

use crate::transaction::Transaction;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use xa_core::{Error, Result, TransactionKey, TransactionStatus};

/// Coordinates transaction completion
///
/// # Thread Safety
///
/// Completion is serialized via an internal lock so that two threads cannot
/// run notifications for transactions concurrently; the pre-completion
/// decision and the final status change happen atomically with respect to
/// other completions.
pub struct TransactionManager {
    /// Live transactions, addressable by key from remote calls
    live: Mutex<HashMap<TransactionKey, Arc<Transaction>>>,

    /// Number of transactions that reached Committed
    committed: AtomicU64,

    /// Number of transactions that reached RolledBack
    rolled_back: AtomicU64,

    /// Completion serialization lock
    commit_lock: Mutex<()>,
}

impl TransactionManager {
    /// Create a new transaction manager with no live transactions
    pub fn new() -> Self {
        TransactionManager {
            live: Mutex::new(HashMap::new()),
            committed: AtomicU64::new(0),
            rolled_back: AtomicU64::new(0),
            commit_lock: Mutex::new(()),
        }
    }

    /// Begin a new transaction
    pub fn begin(&self) -> Arc<Transaction> {
        let txn = Arc::new(Transaction::new());
        self.live.lock().insert(txn.key(), Arc::clone(&txn));
        tracing::debug!(txn = %txn.key(), "transaction begun");
        txn
    }

    /// Resolve a live transaction by key
    pub fn lookup(&self, key: &TransactionKey) -> Result<Arc<Transaction>> {
        self.live
            .lock()
            .get(key)
            .cloned()
            .ok_or(Error::TransactionNotFound(*key))
    }

    /// Number of transactions begun but not yet completed
    pub fn active_count(&self) -> usize {
        self.live.lock().len()
    }

    /// Number of transactions committed by this manager
    pub fn committed_count(&self) -> u64 {
        self.committed.load(Ordering::SeqCst)
    }

    /// Number of transactions rolled back by this manager
    pub fn rolled_back_count(&self) -> u64 {
        self.rolled_back.load(Ordering::SeqCst)
    }

    /// Complete a transaction, committing unless it was voted rollback-only
    ///
    /// # Returns
    /// - Ok(true) if the transaction committed
    /// - Ok(false) if it rolled back (rollback-only before or during
    ///   pre-completion)
    /// - Err(InvalidState) if the transaction was already completed
    pub fn commit(&self, txn: &Transaction) -> Result<bool> {
        let _commit_guard = self.commit_lock.lock();
        self.ensure_open(txn, "commit")?;

        // Index walk so that synchronizations registered by an earlier hook
        // are still notified.
        let mut index = 0;
        while let Some(sync) = txn.synchronization_at(index) {
            if let Err(e) = sync.before_completion(txn) {
                tracing::warn!(
                    txn = %txn.key(),
                    error = %e,
                    "before_completion failed; forcing rollback"
                );
                if let Err(e) = txn.set_rollback_only() {
                    tracing::error!(txn = %txn.key(), error = %e, "could not mark rollback-only");
                }
            }
            index += 1;
        }

        // Votes and registrations are closed atomically with the decision.
        let committed = txn.decide(false, "commit")?;
        self.finish(txn, committed);
        Ok(committed)
    }

    /// Roll a transaction back without a pre-completion phase
    pub fn rollback(&self, txn: &Transaction) -> Result<()> {
        let _commit_guard = self.commit_lock.lock();
        txn.decide(true, "rollback")?;
        self.finish(txn, false);
        Ok(())
    }

    fn ensure_open(&self, txn: &Transaction, operation: &'static str) -> Result<()> {
        let status = txn.status();
        if status.is_open() {
            Ok(())
        } else {
            Err(Error::InvalidState {
                key: txn.key(),
                status,
                operation,
            })
        }
    }

    fn finish(&self, txn: &Transaction, committed: bool) {
        if committed {
            txn.set_status(TransactionStatus::Committed);
            self.committed.fetch_add(1, Ordering::SeqCst);
        } else {
            txn.set_status(TransactionStatus::RolledBack);
            self.rolled_back.fetch_add(1, Ordering::SeqCst);
        }
        self.live.lock().remove(&txn.key());

        for sync in txn.synchronizations() {
            sync.after_completion(txn, committed);
        }

        tracing::info!(
            txn = %txn.key(),
            committed,
            synchronizations = txn.synchronization_count(),
            "transaction completed"
        );
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new()
    }
}
