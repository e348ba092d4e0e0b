//! Core types for the XA participant
//!
//! This crate defines the vocabulary shared by every other crate:
//! - [`TransactionKey`]: opaque, comparable identity of a transaction
//! - [`TransactionStatus`]: JTA-compatible status codes
//! - [`CommitOutcome`]: what a participant learned about the final decision
//! - [`Error`]: failures surfaced by participant and coordinator operations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod status;
pub mod types;

pub use error::{Error, Result};
pub use status::{CommitOutcome, TransactionStatus};
pub use types::TransactionKey;
