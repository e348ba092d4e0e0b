//! Participant state machine
//!
//! ```text
//! [Not Enlisted] --first business call in a txn--> [Enlisted, pre=false]
//! [Enlisted]     --before_completion-------------> [pre=true]   (votes rollback if flagged)
//! [pre=true]     --after_completion(committed)---> [Completed, outcome recorded]
//! [Completed]    --reset_status------------------> [Not Enlisted]
//! ```
//!
//! Enlistment registers the participant with the transaction as a
//! [`Synchronization`]. Notifications for a transaction the participant is no
//! longer enlisted in (because of a reset or a later enlistment) are ignored.
//!
//! A business call inside a different transaction while still enlisted starts
//! a new enlistment cycle: the pre-completion flag and the outcome are
//! cleared, the captured transaction identity is kept as "most recently seen"
//! so that a `same_transaction(false)` check against it still fails loudly.

use crate::fault::{HostResolver, ImmediateHalt, ProcessHalt, SystemHostResolver};
use crate::options::ParticipantOptions;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use xa_concurrency::{Synchronization, Transaction};
use xa_core::{CommitOutcome, Error, Result, TransactionKey, TransactionStatus};

/// Mutable participant state, guarded by one lock
#[derive(Debug, Default)]
struct ParticipantState {
    /// Captured by `same_transaction(true)`
    transaction_identity: Option<TransactionKey>,
    /// Operator flag applied during pre-completion
    pending_rollback_only: bool,
    /// Set by the pre-completion hook
    saw_pre_completion: bool,
    /// Set by the post-completion hook
    last_outcome: CommitOutcome,
    /// Transaction whose notifications this participant currently accepts
    enlisted_in: Option<TransactionKey>,
}

/// A transactional participant
///
/// Always handled through `Arc`, since the participant registers itself with
/// the transactions it joins.
///
/// # Example
///
/// ```
/// use xa_concurrency::TransactionManager;
/// use xa_participant::Participant;
///
/// let tm = TransactionManager::new();
/// let participant = Participant::new();
///
/// let txn = tm.begin();
/// participant.same_transaction(Some(&txn), true).unwrap();
/// assert!(tm.commit(&txn).unwrap());
///
/// assert_eq!(participant.commit_succeeded(), Some(true));
/// assert!(participant.is_before_completion());
/// ```
pub struct Participant {
    state: Mutex<ParticipantState>,
    options: ParticipantOptions,
    host: Box<dyn HostResolver>,
    halt: Box<dyn ProcessHalt>,
    this: Weak<Participant>,
}

impl Participant {
    /// Create a participant with default options
    pub fn new() -> Arc<Self> {
        Self::from_parts(
            ParticipantOptions::default(),
            Box::new(SystemHostResolver),
            Box::new(ImmediateHalt),
        )
    }

    /// Create a builder for participant configuration
    pub fn builder() -> ParticipantBuilder {
        ParticipantBuilder::new()
    }

    fn from_parts(
        options: ParticipantOptions,
        host: Box<dyn HostResolver>,
        halt: Box<dyn ProcessHalt>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Participant {
            state: Mutex::new(ParticipantState::default()),
            options,
            host,
            halt,
            this: this.clone(),
        })
    }

    /// Options this participant was built with
    pub fn options(&self) -> &ParticipantOptions {
        &self.options
    }

    // =========================================================================
    // Query operations
    // =========================================================================

    /// Status of the ambient transaction, `NoTransaction` without one
    ///
    /// Does not enlist the participant.
    pub fn transaction_status(&self, txn: Option<&Transaction>) -> TransactionStatus {
        tracing::trace!("transactionStatus");
        txn.map(Transaction::status)
            .unwrap_or(TransactionStatus::NoTransaction)
    }

    /// Outcome recorded by the post-completion hook: `None` while unknown
    pub fn commit_succeeded(&self) -> Option<bool> {
        self.state.lock().last_outcome.as_tri_state()
    }

    /// Whether the pre-completion hook fired in the current enlistment
    pub fn is_before_completion(&self) -> bool {
        self.state.lock().saw_pre_completion
    }

    /// Whether a rollback vote is pending for the next pre-completion
    pub fn is_rollback_only_before_completion(&self) -> bool {
        self.state.lock().pending_rollback_only
    }

    /// Transaction the participant is currently enlisted in
    pub fn enlisted_transaction(&self) -> Option<TransactionKey> {
        self.state.lock().enlisted_in
    }

    // =========================================================================
    // Control operations
    // =========================================================================

    /// Forget the last enlistment
    ///
    /// Clears the outcome, the pre-completion flag, the captured identity and
    /// the enlistment itself. The pending rollback flag is left alone.
    /// Needs no transaction; idempotent.
    pub fn reset_status(&self) {
        let mut state = self.state.lock();
        state.last_outcome = CommitOutcome::Unknown;
        state.saw_pre_completion = false;
        state.transaction_identity = None;
        state.enlisted_in = None;
        tracing::debug!("participant status reset");
    }

    /// Record whether the next pre-completion hook votes rollback
    ///
    /// Transaction optional; joins it when one is present and open.
    pub fn set_rollback_only_before_completion(
        &self,
        txn: Option<&Transaction>,
        flag: bool,
    ) -> Result<()> {
        if let Some(txn) = txn.filter(|t| t.status().is_open()) {
            self.enlist(txn)?;
        }
        self.state.lock().pending_rollback_only = flag;
        tracing::debug!(flag, "rollback-only before completion set");
        Ok(())
    }

    /// Check that successive calls share one transaction
    ///
    /// With `first`, captures the ambient transaction's key. Without it,
    /// compares the ambient key against the captured one.
    ///
    /// # Errors
    /// - `NoTransaction` if no transaction is present
    /// - `IdentityMismatch` if the keys differ or none was captured
    pub fn same_transaction(&self, txn: Option<&Transaction>, first: bool) -> Result<String> {
        let txn = txn.ok_or(Error::NoTransaction {
            operation: "sameTransaction",
        })?;
        self.enlist(txn)?;

        let key = txn.key();
        let mut state = self.state.lock();
        if first {
            state.transaction_identity = Some(key);
            return Ok(format!("sameTransaction: transactionKey = {}", key));
        }

        match state.transaction_identity {
            Some(expected) if expected == key => Ok(format!(
                "sameTransaction: transactionKey is the same: {}",
                key
            )),
            expected => Err(Error::IdentityMismatch {
                expected,
                actual: key,
            }),
        }
    }

    /// Vote rollback on the ambient transaction right away
    ///
    /// # Errors
    /// - `NoTransaction` if no transaction is present
    /// - `InvalidState` if the transaction is already completing
    pub fn rollback_only(&self, txn: Option<&Transaction>) -> Result<()> {
        let txn = txn.ok_or(Error::NoTransaction {
            operation: "rollbackOnly",
        })?;
        self.enlist(txn)?;
        txn.set_rollback_only()
    }

    /// Inject a fault
    ///
    /// A `kind` containing the halt marker ends the process before anything
    /// else happens: no reply, no logging, no cleanup. Any other kind returns
    /// a message naming the local host, or the resolver's failure text.
    pub fn inject_fault(&self, txn: Option<&Transaction>, kind: &str) -> Result<String> {
        if self.options.is_halt(kind) {
            self.halt.halt(self.options.halt_exit_code);
        }

        if let Some(txn) = txn.filter(|t| t.status().is_open()) {
            self.enlist(txn)?;
        }

        let reply = match self.host.canonical_host_name() {
            Ok(host) => format!("{} {}", self.options.fault_message_prefix, host),
            Err(e) => e.to_string(),
        };
        tracing::debug!(kind, reply = %reply, "fault injected");
        Ok(reply)
    }

    // =========================================================================
    // Enlistment
    // =========================================================================

    /// Join `txn` unless already enlisted in it
    ///
    /// Registration happens under the state lock so that a completion racing
    /// the enlistment is never taken for a stale one. Lock order is always
    /// participant state, then transaction.
    fn enlist(&self, txn: &Transaction) -> Result<()> {
        let key = txn.key();
        let mut state = self.state.lock();
        if state.enlisted_in == Some(key) {
            return Ok(());
        }

        let Some(this) = self.this.upgrade() else {
            return Err(Error::SynchronizationFailed(
                "participant is being dropped".to_string(),
            ));
        };
        txn.register_synchronization(this)?;

        if let Some(previous) = state.enlisted_in.replace(key) {
            tracing::warn!(
                previous = %previous,
                txn = %key,
                "enlisting in a new transaction without reset"
            );
        }
        state.saw_pre_completion = false;
        state.last_outcome = CommitOutcome::Unknown;
        Ok(())
    }

    fn accepts(&self, state: &ParticipantState, txn: &Transaction, hook: &'static str) -> bool {
        if state.enlisted_in == Some(txn.key()) {
            return true;
        }
        tracing::warn!(txn = %txn.key(), hook, "ignoring notification for stale enlistment");
        false
    }
}

impl Synchronization for Participant {
    fn after_begin(&self, txn: &Transaction) {
        tracing::debug!(txn = %txn.key(), "participant enlisted");
    }

    fn before_completion(&self, txn: &Transaction) -> Result<()> {
        let mut state = self.state.lock();
        if !self.accepts(&state, txn, "before_completion") {
            return Ok(());
        }

        state.saw_pre_completion = true;
        tracing::debug!(
            txn = %txn.key(),
            rollback_only = state.pending_rollback_only,
            "before completion"
        );
        if state.pending_rollback_only {
            txn.set_rollback_only()?;
        }
        Ok(())
    }

    fn after_completion(&self, txn: &Transaction, committed: bool) {
        let mut state = self.state.lock();
        if !self.accepts(&state, txn, "after_completion") {
            return;
        }

        state.last_outcome = CommitOutcome::from_committed(committed);
        tracing::debug!(txn = %txn.key(), committed, "after completion");
    }
}

impl std::fmt::Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("state", &*self.state.lock())
            .field("options", &self.options)
            .finish()
    }
}

/// Builder for [`Participant`]
///
/// # Example
///
/// ```
/// use xa_participant::{Participant, ParticipantOptions};
///
/// let participant = Participant::builder()
///     .options(ParticipantOptions::default().with_halt_marker("CRASH"))
///     .build()
///     .unwrap();
/// assert_eq!(participant.options().halt_marker, "CRASH");
/// ```
pub struct ParticipantBuilder {
    options: ParticipantOptions,
    host: Box<dyn HostResolver>,
    halt: Box<dyn ProcessHalt>,
}

impl ParticipantBuilder {
    /// Create a builder with default options, the system resolver and a real halt
    pub fn new() -> Self {
        ParticipantBuilder {
            options: ParticipantOptions::default(),
            host: Box::new(SystemHostResolver),
            halt: Box::new(ImmediateHalt),
        }
    }

    /// Set fault-injection options
    pub fn options(mut self, options: ParticipantOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the host resolver
    pub fn host_resolver(mut self, host: impl HostResolver + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Replace the process halt
    pub fn halt(mut self, halt: impl ProcessHalt + 'static) -> Self {
        self.halt = Box::new(halt);
        self
    }

    /// Validate options and build the participant
    pub fn build(self) -> Result<Arc<Participant>> {
        self.options.validate()?;
        Ok(Participant::from_parts(self.options, self.host, self.halt))
    }
}

impl Default for ParticipantBuilder {
    fn default() -> Self {
        Self::new()
    }
}
