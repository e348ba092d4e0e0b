//! Transaction context and coordination for the XA participant
//!
//! This crate provides the collaborator side of the participant contract:
//! - [`Transaction`]: identity, status and rollback-only marking of one transaction
//! - [`Synchronization`]: the notification interface a participant implements
//! - [`TransactionManager`]: an in-process coordinator that begins transactions
//!   and drives the pre-/post-completion notifications

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manager;
pub mod transaction;

pub use manager::TransactionManager;
pub use transaction::{Synchronization, Transaction};
