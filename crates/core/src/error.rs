//! Error types for participant and coordinator operations
//!
//! Host-name resolution failures in the fault-injection path are deliberately
//! absent: they are reported back to the caller as data, not raised.

use crate::status::TransactionStatus;
use crate::types::TransactionKey;
use thiserror::Error;

/// Errors surfaced synchronously to the immediate caller.
///
/// None of these are retried by the participant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An operation that requires an active transaction was invoked without one
    #[error("{operation} requires an active transaction")]
    NoTransaction {
        /// Name of the operation that was invoked
        operation: &'static str,
    },

    /// The transaction seen on a follow-up call differs from the captured one
    #[error("transaction on second call was not the same as on first call (expected {}, got {})", display_key(.expected), .actual)]
    IdentityMismatch {
        /// Identity captured by the first call, if any
        expected: Option<TransactionKey>,
        /// Identity of the ambient transaction on this call
        actual: TransactionKey,
    },

    /// Transaction is in a status that does not permit the operation
    #[error("transaction {key} is {status}: cannot {operation}")]
    InvalidState {
        /// Transaction the operation targeted
        key: TransactionKey,
        /// Status at the time of the call
        status: TransactionStatus,
        /// What was attempted
        operation: &'static str,
    },

    /// No live transaction with this key is known to the coordinator
    #[error("transaction not found: {0}")]
    TransactionNotFound(TransactionKey),

    /// A synchronization refused the pre-completion notification
    #[error("synchronization failed: {0}")]
    SynchronizationFailed(String),

    /// Options could not be loaded or are invalid
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

fn display_key(key: &Option<TransactionKey>) -> String {
    match key {
        Some(k) => k.to_string(),
        None => "<not set>".to_string(),
    }
}

impl Error {
    /// Check if this error reports a missing transaction.
    pub fn is_no_transaction(&self) -> bool {
        matches!(self, Error::NoTransaction { .. })
    }

    /// Check if this error reports a transaction identity mismatch.
    pub fn is_identity_mismatch(&self) -> bool {
        matches!(self, Error::IdentityMismatch { .. })
    }
}
