//! Fault-injection primitives
//!
//! Two seams, both swappable so the participant can be exercised in-process:
//! - [`ProcessHalt`]: ends the process. The production implementation calls
//!   `_exit(2)`: no destructors, no atexit handlers, no stdio flush.
//! - [`HostResolver`]: names the local host for the non-halt fault reply. The
//!   production implementation uses `hostname` and `dns-lookup`.

use thiserror::Error;

/// Terminates the hosting process
///
/// Implementations never return. Test doubles may unwind instead of exiting,
/// but must not hand control back to the caller normally.
pub trait ProcessHalt: Send + Sync {
    /// End the process with `code`
    fn halt(&self, code: i32) -> !;
}

/// Halts the real process immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateHalt;

impl ProcessHalt for ImmediateHalt {
    #[cfg(unix)]
    fn halt(&self, code: i32) -> ! {
        // SAFETY: _exit is async-signal-safe and takes no pointers.
        unsafe { libc::_exit(code) }
    }

    #[cfg(not(unix))]
    fn halt(&self, _code: i32) -> ! {
        std::process::abort()
    }
}

/// Local host could not be resolved
///
/// Never raised to callers; its text becomes the fault reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{host}: {reason}")]
pub struct HostResolutionError {
    /// Host name that failed to resolve
    pub host: String,
    /// Resolver's description of the failure
    pub reason: String,
}

impl HostResolutionError {
    /// Create a resolution error
    pub fn new(host: impl Into<String>, reason: impl Into<String>) -> Self {
        HostResolutionError {
            host: host.into(),
            reason: reason.into(),
        }
    }
}

/// Names the local host
pub trait HostResolver: Send + Sync {
    /// Fully qualified name of the local host
    fn canonical_host_name(&self) -> Result<String, HostResolutionError>;
}

/// Resolves the local host through the system resolver
///
/// Reads the local name, resolves it to an address and reverse-resolves that
/// address. Falls back to the textual address when no reverse entry exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostResolver;

impl HostResolver for SystemHostResolver {
    fn canonical_host_name(&self) -> Result<String, HostResolutionError> {
        let host = hostname::get()
            .map_err(|e| HostResolutionError::new("localhost", e.to_string()))?
            .to_string_lossy()
            .into_owned();
        canonical_name(&host)
    }
}

fn canonical_name(host: &str) -> Result<String, HostResolutionError> {
    let addr = dns_lookup::lookup_host(host)
        .map_err(|e| HostResolutionError::new(host, e.to_string()))?
        .into_iter()
        .next()
        .ok_or_else(|| HostResolutionError::new(host, "no addresses found"))?;

    Ok(dns_lookup::lookup_addr(&addr).unwrap_or_else(|_| addr.to_string()))
}
