//! Shared helpers for participant scenario tests.

use xaharness::{HostResolutionError, HostResolver, Harness, ProcessHalt};

pub struct FixedHost;

impl HostResolver for FixedHost {
    fn canonical_host_name(&self) -> Result<String, HostResolutionError> {
        Ok("node1.example.com".to_string())
    }
}

/// Unwinds instead of exiting so tests survive a halt request
pub struct PanicHalt;

impl ProcessHalt for PanicHalt {
    fn halt(&self, code: i32) -> ! {
        panic!("halted with exit code {}", code)
    }
}

pub fn create_harness() -> Harness {
    Harness::builder()
        .host_resolver(FixedHost)
        .halt(PanicHalt)
        .build()
        .unwrap()
}
