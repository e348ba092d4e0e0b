//! # xaharness
//!
//! A transactional participant for testing XA transaction coordinators.
//!
//! The participant is enlisted in a transaction by its first business call,
//! receives the coordinator's pre- and post-completion notifications, and
//! lets a harness assert what the coordinator decided. It can also force
//! rollback votes and kill its own process mid-transaction to exercise
//! recovery.
//!
//! ## Quick Start
//!
//! ```
//! use xaharness::prelude::*;
//!
//! let harness = Harness::new().unwrap();
//! let client = harness.client();
//!
//! let txn = client.begin().unwrap();
//! client.same_transaction(Some(txn), true).unwrap();
//! client.same_transaction(Some(txn), false).unwrap();
//! assert!(client.commit(txn).unwrap());
//!
//! assert_eq!(client.commit_succeeded().unwrap(), Some(true));
//! assert!(client.is_before_completion().unwrap());
//!
//! client.reset_status().unwrap();
//! assert_eq!(client.commit_succeeded().unwrap(), None);
//! ```
//!
//! ## Components
//!
//! - [`Participant`] - the synchronization state machine
//! - [`TransactionManager`] - in-process coordinator used to drive it
//! - [`Client`] / [`Executor`] - serializable command surface
//! - [`Harness`] - wires the three together

#![warn(missing_docs)]

mod error;
mod harness;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use harness::{Harness, HarnessBuilder, HarnessMetrics};

// Re-export components
pub use xa_concurrency::{Synchronization, Transaction, TransactionManager};
pub use xa_core::{CommitOutcome, TransactionKey, TransactionStatus};
pub use xa_executor::{wire, Client, Command, Executor, Output};
pub use xa_participant::{
    HostResolutionError, HostResolver, ImmediateHalt, Participant, ParticipantBuilder,
    ParticipantOptions, ProcessHalt, SystemHostResolver,
};
