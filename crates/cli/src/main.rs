//! xa-host: serves one XA participant, plus an in-process coordinator, over
//! JSON lines on stdin/stdout.
//!
//! A harness drives transactions by writing requests and reading responses;
//! an `InjectFault` whose kind contains the halt marker kills this process
//! before its response is written, which is what coordinator recovery tests
//! need to observe.

mod commands;
mod parse;

use std::io;
use std::process;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xa_concurrency::TransactionManager;
use xa_executor::{wire, Executor};
use xa_participant::Participant;

use commands::build_cli;
use parse::{matches_to_config, HostConfig};

fn main() {
    let matches = build_cli().get_matches();

    let config = match matches_to_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(2);
        }
    };

    init_logging(&config);

    let participant = match Participant::builder().options(config.options).build() {
        Ok(participant) => participant,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(2);
        }
    };
    let executor = Executor::new(Arc::new(TransactionManager::new()), participant);

    tracing::info!(pid = process::id(), "xa-host serving");
    let stdin = io::stdin();
    let stdout = io::stdout();
    match wire::serve(&executor, stdin.lock(), stdout.lock()) {
        Ok(summary) => {
            tracing::info!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "input closed"
            );
        }
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(1);
        }
    }
}

fn init_logging(config: &HostConfig) {
    let Some(filter) = &config.log_filter else {
        return;
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
