//! Transactional participant with fault injection
//!
//! A [`Participant`] is enlisted in a transaction by its first business call
//! inside that transaction, receives the coordinator's completion
//! notifications through [`xa_concurrency::Synchronization`], and exposes
//! enough state for a test harness to assert what the coordinator did.
//!
//! [`Participant::inject_fault`] can terminate the hosting process on the
//! spot to simulate a crash in the middle of a transaction.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fault;
pub mod options;
pub mod participant;

pub use fault::{HostResolutionError, HostResolver, ImmediateHalt, ProcessHalt, SystemHostResolver};
pub use options::ParticipantOptions;
pub use participant::{Participant, ParticipantBuilder};
