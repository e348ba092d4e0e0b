//! Transaction context
//!
//! A [`Transaction`] is what a participant sees of the ambient transaction:
//! its key, its status, and the ability to vote rollback. The coordinator
//! additionally uses it to hold the registered synchronizations.
//!
//! ## Status transitions
//!
//! ```text
//! Active ──set_rollback_only──> MarkedRollback
//!   │                              │
//!   ├──commit──> Committing ──> Committed
//!   └──────────────┴──rollback──> RollingBack ──> RolledBack
//! ```
//!
//! Synchronizations may only be registered, and rollback-only may only be
//! set, while the transaction is open (Active or MarkedRollback).

use parking_lot::Mutex;
use std::sync::Arc;
use xa_core::{Error, Result, TransactionKey, TransactionStatus};

/// Completion notifications delivered by a coordinator
///
/// Registered through [`Transaction::register_synchronization`]. For every
/// registered synchronization the coordinator calls `before_completion` at
/// most once, then `after_completion` exactly once. A rollback decided
/// without a prepare phase skips `before_completion`.
pub trait Synchronization: Send + Sync {
    /// Called once when the synchronization is first registered with `txn`
    fn after_begin(&self, _txn: &Transaction) {}

    /// Called before the outcome is decided; may vote rollback via
    /// [`Transaction::set_rollback_only`]. An error forces rollback.
    fn before_completion(&self, txn: &Transaction) -> Result<()>;

    /// Called after the outcome is final
    fn after_completion(&self, txn: &Transaction, committed: bool);
}

/// One transaction as seen by participants and the coordinator
pub struct Transaction {
    key: TransactionKey,
    inner: Mutex<TransactionInner>,
}

/// Status and registrations change together under one lock
struct TransactionInner {
    status: TransactionStatus,
    synchronizations: Vec<Arc<dyn Synchronization>>,
}

impl Transaction {
    /// Create a new active transaction with a fresh key
    pub fn new() -> Self {
        Self::with_key(TransactionKey::new())
    }

    /// Create a new active transaction with the given key
    pub fn with_key(key: TransactionKey) -> Self {
        Transaction {
            key,
            inner: Mutex::new(TransactionInner {
                status: TransactionStatus::Active,
                synchronizations: Vec::new(),
            }),
        }
    }

    /// Identity of this transaction
    pub fn key(&self) -> TransactionKey {
        self.key
    }

    /// Current status
    pub fn status(&self) -> TransactionStatus {
        self.inner.lock().status
    }

    /// Check if the only possible outcome is rollback
    pub fn is_rollback_only(&self) -> bool {
        matches!(
            self.status(),
            TransactionStatus::MarkedRollback | TransactionStatus::RollingBack
        )
    }

    /// Mark the transaction so that the only possible outcome is rollback
    ///
    /// Idempotent while open. Fails with `InvalidState` once the coordinator
    /// has decided the outcome, so a vote is either counted or rejected.
    pub fn set_rollback_only(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        match inner.status {
            TransactionStatus::Active => {
                inner.status = TransactionStatus::MarkedRollback;
                tracing::debug!(txn = %self.key, "transaction marked rollback-only");
                Ok(())
            }
            TransactionStatus::MarkedRollback => Ok(()),
            other => Err(self.invalid_state(other, "set rollback only")),
        }
    }

    /// Register a synchronization for completion notifications
    ///
    /// Returns `Ok(true)` when newly registered, in which case `after_begin`
    /// has been invoked; `Ok(false)` when the same instance was already
    /// registered. Once the outcome is decided registration fails, so every
    /// registered synchronization receives `after_completion`.
    pub fn register_synchronization(&self, sync: Arc<dyn Synchronization>) -> Result<bool> {
        {
            let mut inner = self.inner.lock();
            if !inner.status.is_open() {
                return Err(self.invalid_state(inner.status, "register synchronization"));
            }

            let target = Arc::as_ptr(&sync) as *const ();
            if inner
                .synchronizations
                .iter()
                .any(|s| Arc::as_ptr(s) as *const () == target)
            {
                return Ok(false);
            }
            inner.synchronizations.push(Arc::clone(&sync));
        }

        // Outside the lock: the hook may call back into this transaction.
        sync.after_begin(self);
        Ok(true)
    }

    /// Number of registered synchronizations
    pub fn synchronization_count(&self) -> usize {
        self.inner.lock().synchronizations.len()
    }

    /// Synchronization at `index` in registration order
    pub(crate) fn synchronization_at(&self, index: usize) -> Option<Arc<dyn Synchronization>> {
        self.inner.lock().synchronizations.get(index).cloned()
    }

    /// Snapshot of all registered synchronizations
    pub(crate) fn synchronizations(&self) -> Vec<Arc<dyn Synchronization>> {
        self.inner.lock().synchronizations.clone()
    }

    /// Close the transaction to votes and registrations and decide the outcome
    ///
    /// `Active` moves to `Committing` (returns true), `MarkedRollback` to
    /// `RollingBack` (returns false). With `force_rollback` both roll back.
    pub(crate) fn decide(&self, force_rollback: bool, operation: &'static str) -> Result<bool> {
        let mut inner = self.inner.lock();
        let committed = match inner.status {
            TransactionStatus::Active => !force_rollback,
            TransactionStatus::MarkedRollback => false,
            other => return Err(self.invalid_state(other, operation)),
        };
        inner.status = if committed {
            TransactionStatus::Committing
        } else {
            TransactionStatus::RollingBack
        };
        Ok(committed)
    }

    pub(crate) fn set_status(&self, status: TransactionStatus) {
        self.inner.lock().status = status;
    }

    fn invalid_state(&self, status: TransactionStatus, operation: &'static str) -> Error {
        Error::InvalidState {
            key: self.key,
            status,
            operation,
        }
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("key", &self.key)
            .field("status", &self.status())
            .field("synchronizations", &self.synchronization_count())
            .finish()
    }
}
