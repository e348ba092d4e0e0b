//! Participant scenario tests
//!
//! End-to-end behaviour of the participant driven through the harness:
//! - scenarios: commit, forced rollback, immediate rollback, ordering checks
//! - properties: identity, reset and outcome invariants under generated input
//! - observers: notification ordering seen alongside other synchronizations
//! - config: option loading through the harness builder

mod common;

mod config;
mod observers;
mod properties;
mod scenarios;
