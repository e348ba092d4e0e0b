//! Transaction identity
//!
//! A [`TransactionKey`] is the only thing a participant knows about which
//! transaction a call belongs to. It is compared, displayed and shipped across
//! process boundaries, never interpreted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of a transaction
///
/// Two calls belong to the same transaction exactly when their keys are equal.
/// The key is what crosses the wire when a transaction context is propagated
/// to a remote participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionKey(Uuid);

impl TransactionKey {
    /// Create a new random key using UUID v4
    ///
    /// # Examples
    ///
    /// ```
    /// use xa_core::TransactionKey;
    ///
    /// let k1 = TransactionKey::new();
    /// let k2 = TransactionKey::new();
    /// assert_ne!(k1, k2);
    /// ```
    pub fn new() -> Self {
        TransactionKey(Uuid::new_v4())
    }

}

impl Default for TransactionKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
