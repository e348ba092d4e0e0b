//! Convenient imports for xaharness.
//!
//! ```
//! use xaharness::prelude::*;
//!
//! let harness = Harness::new().unwrap();
//! assert_eq!(
//!     harness.client().transaction_status(None).unwrap(),
//!     TransactionStatus::NoTransaction
//! );
//! ```

// Main entry point
pub use crate::harness::{Harness, HarnessBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Components
pub use xa_concurrency::{Transaction, TransactionManager};
pub use xa_executor::Client;
pub use xa_participant::{Participant, ParticipantOptions};

// Core types
pub use xa_core::{CommitOutcome, TransactionKey, TransactionStatus};
