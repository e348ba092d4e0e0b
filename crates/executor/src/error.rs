//! Executor error type.
//!
//! ## Error Codes (Canonical)
//!
//! | Code | Description |
//! |------|-------------|
//! | NoTransaction | Operation requires a transaction and none was supplied |
//! | IdentityMismatch | Follow-up call saw a different (or no) captured transaction |
//! | InvalidState | Transaction status does not permit the operation |
//! | TransactionNotFound | Key does not name a live transaction |
//! | SynchronizationFailed | A completion hook failed |
//! | InvalidInput | Request could not be decoded or options are invalid |
//! | Internal | Bug or invariant violation |

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xa_core::TransactionKey;

/// Errors returned by [`Executor::execute`](crate::Executor::execute)
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum Error {
    /// Operation requires an active transaction
    #[error("{operation} requires an active transaction")]
    NoTransaction {
        /// Operation name
        operation: String,
    },

    /// Transaction identity differs from the captured one
    #[error("{reason}")]
    IdentityMismatch {
        /// Description including both identities
        reason: String,
    },

    /// Transaction status does not permit the operation
    #[error("invalid state: {reason}")]
    InvalidState {
        /// Description of the conflict
        reason: String,
    },

    /// No live transaction with this key
    #[error("transaction not found: {key}")]
    TransactionNotFound {
        /// Unknown key
        key: TransactionKey,
    },

    /// A completion hook failed
    #[error("synchronization failed: {reason}")]
    SynchronizationFailed {
        /// Hook failure description
        reason: String,
    },

    /// Request could not be decoded or configuration is invalid
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },

    /// Bug or invariant violation
    #[error("internal error: {reason}")]
    Internal {
        /// Description
        reason: String,
    },
}

/// Result type for executor operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the canonical error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NoTransaction { .. } => "NoTransaction",
            Error::IdentityMismatch { .. } => "IdentityMismatch",
            Error::InvalidState { .. } => "InvalidState",
            Error::TransactionNotFound { .. } => "TransactionNotFound",
            Error::SynchronizationFailed { .. } => "SynchronizationFailed",
            Error::InvalidInput { .. } => "InvalidInput",
            Error::Internal { .. } => "Internal",
        }
    }
}

impl From<xa_core::Error> for Error {
    fn from(e: xa_core::Error) -> Self {
        use xa_core::Error as CoreError;
        match e {
            CoreError::NoTransaction { operation } => Error::NoTransaction {
                operation: operation.to_string(),
            },
            err @ CoreError::IdentityMismatch { .. } => Error::IdentityMismatch {
                reason: err.to_string(),
            },
            err @ CoreError::InvalidState { .. } => Error::InvalidState {
                reason: err.to_string(),
            },
            CoreError::TransactionNotFound(key) => Error::TransactionNotFound { key },
            CoreError::SynchronizationFailed(reason) => Error::SynchronizationFailed { reason },
            CoreError::Config(reason) => Error::InvalidInput { reason },
        }
    }
}
