//! Command execution layer for the XA participant
//!
//! Every participant and coordinator operation is a serializable
//! [`Command`]; the [`Executor`] dispatches it and answers with an
//! [`Output`]. Transaction context crosses the boundary as a
//! [`TransactionKey`](xa_core::TransactionKey) and is resolved through the
//! coordinator's registry of live transactions.
//!
//! - [`Client`]: typed method-per-command wrapper for in-process callers
//! - [`wire`]: JSON line framing used by the `xa-host` process

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod command;
mod error;
mod executor;
mod output;
pub mod wire;

#[cfg(test)]
mod tests;

pub use client::Client;
pub use command::Command;
pub use error::{Error, Result};
pub use executor::Executor;
pub use output::Output;
