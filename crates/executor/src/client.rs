//! High-level typed wrapper for the Executor.
//!
//! The [`Client`] struct provides a Rust API that wraps the [`Executor`] and
//! [`Command`]/[`Output`] enums with typed method calls.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use xa_concurrency::TransactionManager;
//! use xa_executor::{Client, Executor};
//! use xa_participant::Participant;
//!
//! let client = Client::new(Executor::new(
//!     Arc::new(TransactionManager::new()),
//!     Participant::new(),
//! ));
//!
//! let txn = client.begin().unwrap();
//! client.same_transaction(Some(txn), true).unwrap();
//! client.same_transaction(Some(txn), false).unwrap();
//! assert!(client.commit(txn).unwrap());
//! assert_eq!(client.commit_succeeded().unwrap(), Some(true));
//! ```

use xa_core::{TransactionKey, TransactionStatus};

use crate::{Command, Error, Executor, Output, Result};

/// Typed wrapper over an [`Executor`]
///
/// Each method:
///
/// 1. Creates the appropriate [`Command`]
/// 2. Executes it via the [`Executor`]
/// 3. Extracts and returns the typed result
pub struct Client {
    executor: Executor,
}

impl Client {
    /// Create a client over an executor
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Get the underlying executor
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Ping the executor, returning its version
    pub fn ping(&self) -> Result<String> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { version } => Ok(version),
            other => Err(unexpected("Ping", other)),
        }
    }

    // =========================================================================
    // Coordinator
    // =========================================================================

    /// Begin a transaction
    pub fn begin(&self) -> Result<TransactionKey> {
        match self.executor.execute(Command::Begin)? {
            Output::Transaction(key) => Ok(key),
            other => Err(unexpected("Begin", other)),
        }
    }

    /// Commit a transaction; `false` if it rolled back instead
    pub fn commit(&self, txn: TransactionKey) -> Result<bool> {
        match self.executor.execute(Command::Commit { txn })? {
            Output::Committed(committed) => Ok(committed),
            other => Err(unexpected("Commit", other)),
        }
    }

    /// Roll a transaction back
    pub fn rollback(&self, txn: TransactionKey) -> Result<()> {
        match self.executor.execute(Command::Rollback { txn })? {
            Output::Unit => Ok(()),
            other => Err(unexpected("Rollback", other)),
        }
    }

    // =========================================================================
    // Participant
    // =========================================================================

    /// Status of the given transaction, `NoTransaction` for `None`
    ///
    /// The numeric status code is authoritative; a name that disagrees with
    /// it is reported as `Internal`.
    pub fn transaction_status(&self, txn: Option<TransactionKey>) -> Result<TransactionStatus> {
        match self.executor.execute(Command::TransactionStatus { txn })? {
            Output::Status { status, code } => match TransactionStatus::from_code(code) {
                Some(decoded) if decoded == status => Ok(decoded),
                _ => Err(Error::Internal {
                    reason: format!("status {} does not match code {}", status, code),
                }),
            },
            other => Err(unexpected("TransactionStatus", other)),
        }
    }

    /// Reset the participant for the next enlistment
    pub fn reset_status(&self) -> Result<()> {
        match self.executor.execute(Command::ResetStatus)? {
            Output::Unit => Ok(()),
            other => Err(unexpected("ResetStatus", other)),
        }
    }

    /// Arm or disarm the rollback vote for the next pre-completion
    pub fn set_rollback_only_before_completion(
        &self,
        txn: Option<TransactionKey>,
        flag: bool,
    ) -> Result<()> {
        match self
            .executor
            .execute(Command::SetRollbackOnlyBeforeCompletion { txn, flag })?
        {
            Output::Unit => Ok(()),
            other => Err(unexpected("SetRollbackOnlyBeforeCompletion", other)),
        }
    }

    /// Capture or compare the transaction identity
    pub fn same_transaction(&self, txn: Option<TransactionKey>, first: bool) -> Result<String> {
        match self
            .executor
            .execute(Command::SameTransaction { txn, first })?
        {
            Output::Text(text) => Ok(text),
            other => Err(unexpected("SameTransaction", other)),
        }
    }

    /// Mark the transaction rollback-only now
    pub fn rollback_only(&self, txn: Option<TransactionKey>) -> Result<()> {
        match self.executor.execute(Command::RollbackOnly { txn })? {
            Output::Unit => Ok(()),
            other => Err(unexpected("RollbackOnly", other)),
        }
    }

    /// Outcome recorded by the participant, `None` while unknown
    pub fn commit_succeeded(&self) -> Result<Option<bool>> {
        match self.executor.execute(Command::GetCommitSucceeded)? {
            Output::MaybeBool(outcome) => Ok(outcome),
            other => Err(unexpected("GetCommitSucceeded", other)),
        }
    }

    /// Whether the pre-completion hook fired
    pub fn is_before_completion(&self) -> Result<bool> {
        match self.executor.execute(Command::IsBeforeCompletion)? {
            Output::Bool(flag) => Ok(flag),
            other => Err(unexpected("IsBeforeCompletion", other)),
        }
    }

    /// Inject a fault
    pub fn inject_fault(&self, txn: Option<TransactionKey>, kind: &str) -> Result<String> {
        match self.executor.execute(Command::InjectFault {
            txn,
            kind: kind.to_string(),
        })? {
            Output::Text(text) => Ok(text),
            other => Err(unexpected("InjectFault", other)),
        }
    }
}

fn unexpected(command: &str, output: Output) -> Error {
    Error::Internal {
        reason: format!("Unexpected output for {}: {:?}", command, output),
    }
}
