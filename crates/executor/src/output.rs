//! Outputs produced by the executor.

use serde::{Deserialize, Serialize};
use xa_core::{TransactionKey, TransactionStatus};

/// Successful result of a [`Command`](crate::Command)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// No value
    Unit,
    /// Reply to Ping
    Pong {
        /// Crate version of the serving executor
        version: String,
    },
    /// Key of a newly begun transaction
    Transaction(TransactionKey),
    /// Whether a completed transaction committed
    Committed(bool),
    /// Transaction status with its JTA code
    Status {
        /// Status
        status: TransactionStatus,
        /// JTA numeric code of `status`
        code: i32,
    },
    /// Text reply
    Text(String),
    /// Boolean reply
    Bool(bool),
    /// Tri-state reply: `None` while unknown
    MaybeBool(Option<bool>),
}

impl Output {
    /// Status output carrying the matching JTA code
    pub fn status(status: TransactionStatus) -> Self {
        Output::Status {
            status,
            code: status.code(),
        }
    }
}
