//! Commands accepted by the executor.

use serde::{Deserialize, Serialize};
use xa_core::TransactionKey;

/// One operation, as it travels across a process boundary
///
/// `txn` fields carry the caller's transaction context. Operations that
/// require a transaction fail with `NoTransaction` when it is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Liveness check
    Ping,

    // =========================================================================
    // Coordinator
    // =========================================================================
    /// Begin a transaction
    Begin,
    /// Run completion and commit unless rollback-only
    Commit {
        /// Transaction to complete
        txn: TransactionKey,
    },
    /// Roll back without a pre-completion phase
    Rollback {
        /// Transaction to roll back
        txn: TransactionKey,
    },

    // =========================================================================
    // Participant
    // =========================================================================
    /// Status of the caller's transaction
    TransactionStatus {
        /// Caller's transaction, if any
        #[serde(default)]
        txn: Option<TransactionKey>,
    },
    /// Clear outcome, pre-completion flag, captured identity and enlistment
    ResetStatus,
    /// Arm or disarm the rollback vote for the next pre-completion
    SetRollbackOnlyBeforeCompletion {
        /// Caller's transaction, if any
        #[serde(default)]
        txn: Option<TransactionKey>,
        /// Whether to vote rollback
        flag: bool,
    },
    /// Capture (first) or compare the caller's transaction identity
    SameTransaction {
        /// Caller's transaction
        #[serde(default)]
        txn: Option<TransactionKey>,
        /// Capture instead of compare
        first: bool,
    },
    /// Mark the caller's transaction rollback-only now
    RollbackOnly {
        /// Caller's transaction
        #[serde(default)]
        txn: Option<TransactionKey>,
    },
    /// Outcome seen by the post-completion hook
    GetCommitSucceeded,
    /// Whether the pre-completion hook fired
    IsBeforeCompletion,
    /// Inject a fault; a halt kind ends the serving process
    InjectFault {
        /// Caller's transaction, if any
        #[serde(default)]
        txn: Option<TransactionKey>,
        /// Fault kind
        kind: String,
    },
}

impl Command {
    /// Command name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "Ping",
            Command::Begin => "Begin",
            Command::Commit { .. } => "Commit",
            Command::Rollback { .. } => "Rollback",
            Command::TransactionStatus { .. } => "TransactionStatus",
            Command::ResetStatus => "ResetStatus",
            Command::SetRollbackOnlyBeforeCompletion { .. } => "SetRollbackOnlyBeforeCompletion",
            Command::SameTransaction { .. } => "SameTransaction",
            Command::RollbackOnly { .. } => "RollbackOnly",
            Command::GetCommitSucceeded => "GetCommitSucceeded",
            Command::IsBeforeCompletion => "IsBeforeCompletion",
            Command::InjectFault { .. } => "InjectFault",
        }
    }
}
