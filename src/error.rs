//! Unified error types for xaharness.
//!
//! This module provides one error type that wraps the per-crate errors and
//! presents a consistent interface to users.

use thiserror::Error;

/// All xaharness errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Operation requires an active transaction
    #[error("no transaction: {0}")]
    NoTransaction(String),

    /// Follow-up call saw a different transaction than the captured one
    #[error("identity mismatch: {0}")]
    IdentityMismatch(String),

    /// Transaction status does not permit the operation
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Key does not name a live transaction
    #[error("transaction not found: {0}")]
    TransactionNotFound(String),

    /// Options could not be loaded or are invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for xaharness operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a missing-transaction error.
    pub fn is_no_transaction(&self) -> bool {
        matches!(self, Error::NoTransaction(_))
    }

    /// Check if this is an identity mismatch.
    pub fn is_identity_mismatch(&self) -> bool {
        matches!(self, Error::IdentityMismatch(_))
    }
}

// Convert from core errors
impl From<xa_core::Error> for Error {
    fn from(e: xa_core::Error) -> Self {
        use xa_core::Error as CoreError;
        match e {
            CoreError::NoTransaction { operation } => Error::NoTransaction(operation.to_string()),
            err @ CoreError::IdentityMismatch { .. } => Error::IdentityMismatch(err.to_string()),
            err @ CoreError::InvalidState { .. } => Error::InvalidState(err.to_string()),
            CoreError::TransactionNotFound(key) => Error::TransactionNotFound(key.to_string()),
            CoreError::SynchronizationFailed(msg) => Error::Internal(msg),
            CoreError::Config(msg) => Error::Config(msg),
        }
    }
}

// Convert from executor errors
impl From<xa_executor::Error> for Error {
    fn from(e: xa_executor::Error) -> Self {
        use xa_executor::Error as ExecError;
        match e {
            ExecError::NoTransaction { operation } => Error::NoTransaction(operation),
            ExecError::IdentityMismatch { reason } => Error::IdentityMismatch(reason),
            ExecError::InvalidState { reason } => Error::InvalidState(reason),
            ExecError::TransactionNotFound { key } => Error::TransactionNotFound(key.to_string()),
            ExecError::SynchronizationFailed { reason } => Error::Internal(reason),
            ExecError::InvalidInput { reason } => Error::Config(reason),
            ExecError::Internal { reason } => Error::Internal(reason),
        }
    }
}
