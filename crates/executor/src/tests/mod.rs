//! Executor tests.


use std::sync::Arc;

use xa_concurrency::TransactionManager;
use xa_participant::{HostResolutionError, HostResolver, Participant, ProcessHalt};

use crate::{Client, Executor};

struct FixedHost;

impl HostResolver for FixedHost {
    fn canonical_host_name(&self) -> std::result::Result<String, HostResolutionError> {
        Ok("node1.example.com".to_string())
    }
}

struct PanicHalt;

impl ProcessHalt for PanicHalt {
    fn halt(&self, code: i32) -> ! {
        panic!("halted with exit code {}", code)
    }
}

/// Executor over a fresh coordinator and a participant that cannot kill the test process.
fn create_executor() -> Executor {
    let participant = Participant::builder()
        .host_resolver(FixedHost)
        .halt(PanicHalt)
        .build()
        .unwrap();
    Executor::new(Arc::new(TransactionManager::new()), participant)
}

fn create_client() -> Client {
    Client::new(create_executor())
}
