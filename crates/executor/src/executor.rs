//! Command dispatcher.

use std::sync::Arc;

use xa_concurrency::{Transaction, TransactionManager};
use xa_core::TransactionKey;
use xa_participant::Participant;

use crate::{Command, Output, Result};

/// Dispatches [`Command`]s to a coordinator and a participant
///
/// Stateless apart from the two shared components; cheap to clone.
#[derive(Clone)]
pub struct Executor {
    manager: Arc<TransactionManager>,
    participant: Arc<Participant>,
}

impl Executor {
    /// Create an executor over the given coordinator and participant
    pub fn new(manager: Arc<TransactionManager>, participant: Arc<Participant>) -> Self {
        Self {
            manager,
            participant,
        }
    }

    /// The coordinator commands are dispatched to
    pub fn manager(&self) -> &Arc<TransactionManager> {
        &self.manager
    }

    /// The participant commands are dispatched to
    pub fn participant(&self) -> &Arc<Participant> {
        &self.participant
    }

    /// Execute one command
    pub fn execute(&self, command: Command) -> Result<Output> {
        tracing::trace!(command = command.name(), "execute");

        match command {
            Command::Ping => Ok(Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),

            Command::Begin => Ok(Output::Transaction(self.manager.begin().key())),
            Command::Commit { txn } => {
                let txn = self.manager.lookup(&txn)?;
                Ok(Output::Committed(self.manager.commit(&txn)?))
            }
            Command::Rollback { txn } => {
                let txn = self.manager.lookup(&txn)?;
                self.manager.rollback(&txn)?;
                Ok(Output::Unit)
            }

            Command::TransactionStatus { txn } => {
                let txn = self.resolve(txn)?;
                Ok(Output::status(
                    self.participant.transaction_status(txn.as_deref()),
                ))
            }
            Command::ResetStatus => {
                self.participant.reset_status();
                Ok(Output::Unit)
            }
            Command::SetRollbackOnlyBeforeCompletion { txn, flag } => {
                let txn = self.resolve(txn)?;
                self.participant
                    .set_rollback_only_before_completion(txn.as_deref(), flag)?;
                Ok(Output::Unit)
            }
            Command::SameTransaction { txn, first } => {
                let txn = self.resolve(txn)?;
                Ok(Output::Text(
                    self.participant.same_transaction(txn.as_deref(), first)?,
                ))
            }
            Command::RollbackOnly { txn } => {
                let txn = self.resolve(txn)?;
                self.participant.rollback_only(txn.as_deref())?;
                Ok(Output::Unit)
            }
            Command::GetCommitSucceeded => {
                Ok(Output::MaybeBool(self.participant.commit_succeeded()))
            }
            Command::IsBeforeCompletion => Ok(Output::Bool(self.participant.is_before_completion())),
            Command::InjectFault { txn, kind } => {
                let txn = self.resolve(txn)?;
                Ok(Output::Text(
                    self.participant.inject_fault(txn.as_deref(), &kind)?,
                ))
            }
        }
    }

    /// Resolve the caller's transaction context
    fn resolve(&self, txn: Option<TransactionKey>) -> Result<Option<Arc<Transaction>>> {
        match txn {
            Some(key) => Ok(Some(self.manager.lookup(&key)?)),
            None => Ok(None),
        }
    }
}
