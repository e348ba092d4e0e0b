//! Transaction status codes and completion outcomes
//!
//! [`TransactionStatus`] uses the numeric codes of the JTA `Status` interface
//! so that values reported to a harness line up with what a Java coordinator
//! would report for the same state.
//!
//! | Code | Status |
//! |------|--------|
//! | 0 | Active |
//! | 1 | MarkedRollback |
//! | 2 | Prepared |
//! | 3 | Committed |
//! | 4 | RolledBack |
//! | 5 | Unknown |
//! | 6 | NoTransaction |
//! | 7 | Preparing |
//! | 8 | Committing |
//! | 9 | RollingBack |

use serde::{Deserialize, Serialize};

/// Status of the transaction associated with a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Transaction is running and may still commit
    Active,
    /// Transaction is running but the only possible outcome is rollback
    MarkedRollback,
    /// All resources voted to commit
    Prepared,
    /// Transaction committed
    Committed,
    /// Transaction rolled back
    RolledBack,
    /// Status cannot be determined
    Unknown,
    /// No transaction is associated with the call
    NoTransaction,
    /// Prepare phase in progress
    Preparing,
    /// Commit phase in progress
    Committing,
    /// Rollback in progress
    RollingBack,
}

impl TransactionStatus {
    /// JTA numeric status code
    pub fn code(&self) -> i32 {
        match self {
            TransactionStatus::Active => 0,
            TransactionStatus::MarkedRollback => 1,
            TransactionStatus::Prepared => 2,
            TransactionStatus::Committed => 3,
            TransactionStatus::RolledBack => 4,
            TransactionStatus::Unknown => 5,
            TransactionStatus::NoTransaction => 6,
            TransactionStatus::Preparing => 7,
            TransactionStatus::Committing => 8,
            TransactionStatus::RollingBack => 9,
        }
    }

    /// Status for a JTA numeric code, `None` for codes outside 0..=9
    pub fn from_code(code: i32) -> Option<Self> {
        let status = match code {
            0 => TransactionStatus::Active,
            1 => TransactionStatus::MarkedRollback,
            2 => TransactionStatus::Prepared,
            3 => TransactionStatus::Committed,
            4 => TransactionStatus::RolledBack,
            5 => TransactionStatus::Unknown,
            6 => TransactionStatus::NoTransaction,
            7 => TransactionStatus::Preparing,
            8 => TransactionStatus::Committing,
            9 => TransactionStatus::RollingBack,
            _ => return None,
        };
        Some(status)
    }

    /// Check if business work may still be enlisted (Active or MarkedRollback)
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Active | TransactionStatus::MarkedRollback
        )
    }

    /// Check if the outcome has been finalized
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Committed | TransactionStatus::RolledBack
        )
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Active => "Active",
            TransactionStatus::MarkedRollback => "MarkedRollback",
            TransactionStatus::Prepared => "Prepared",
            TransactionStatus::Committed => "Committed",
            TransactionStatus::RolledBack => "RolledBack",
            TransactionStatus::Unknown => "Unknown",
            TransactionStatus::NoTransaction => "NoTransaction",
            TransactionStatus::Preparing => "Preparing",
            TransactionStatus::Committing => "Committing",
            TransactionStatus::RollingBack => "RollingBack",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome a participant learned from its post-completion notification
///
/// `Unknown` until the notification arrives, and again after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CommitOutcome {
    /// No post-completion notification seen
    #[default]
    Unknown,
    /// Coordinator committed
    Committed,
    /// Coordinator rolled back
    RolledBack,
}

impl CommitOutcome {
    /// Outcome for the boolean passed to a post-completion hook
    pub fn from_committed(committed: bool) -> Self {
        if committed {
            CommitOutcome::Committed
        } else {
            CommitOutcome::RolledBack
        }
    }

    /// Tri-state view: `None` while unknown
    pub fn as_tri_state(&self) -> Option<bool> {
        match self {
            CommitOutcome::Unknown => None,
            CommitOutcome::Committed => Some(true),
            CommitOutcome::RolledBack => Some(false),
        }
    }
}
