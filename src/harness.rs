//! Harness entry point.
//!
//! A [`Harness`] owns one in-process coordinator, one participant and a
//! [`Client`] over both. Tests drive transactions through the client exactly
//! as a remote harness would through `xa-host`.

use crate::error::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use xa_concurrency::TransactionManager;
use xa_executor::{Client, Executor};
use xa_participant::{
    HostResolver, Participant, ParticipantBuilder, ParticipantOptions, ProcessHalt,
};

/// Coordinator, participant and client wired together.
///
/// # Example
///
/// ```
/// use xaharness::Harness;
///
/// let harness = Harness::new().unwrap();
/// let client = harness.client();
///
/// let txn = client.begin().unwrap();
/// client.set_rollback_only_before_completion(Some(txn), true).unwrap();
/// assert!(!client.commit(txn).unwrap());
/// assert_eq!(client.commit_succeeded().unwrap(), Some(false));
/// ```
pub struct Harness {
    manager: Arc<TransactionManager>,
    participant: Arc<Participant>,
    client: Client,
}

impl Harness {
    /// Create a harness with default participant options.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for harness configuration.
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::new()
    }

    /// Typed client over the command surface.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// The in-process coordinator.
    pub fn manager(&self) -> &Arc<TransactionManager> {
        &self.manager
    }

    /// The participant under test.
    pub fn participant(&self) -> &Arc<Participant> {
        &self.participant
    }

    /// Get coordinator metrics.
    pub fn metrics(&self) -> HarnessMetrics {
        HarnessMetrics {
            transactions_committed: self.manager.committed_count(),
            transactions_rolled_back: self.manager.rolled_back_count(),
            transactions_active: self.manager.active_count(),
        }
    }
}

/// Coordinator metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessMetrics {
    /// Total committed transactions
    pub transactions_committed: u64,
    /// Total rolled back transactions
    pub transactions_rolled_back: u64,
    /// Transactions begun but not completed
    pub transactions_active: usize,
}

/// Builder for harness configuration.
///
/// Options come from exactly one source: explicit [`options`](Self::options)
/// if set, otherwise the TOML file set with [`config_file`](Self::config_file),
/// otherwise the defaults. Sources are not merged; explicit options make the
/// builder ignore the file without reading it.
pub struct HarnessBuilder {
    participant: ParticipantBuilder,
    options: Option<ParticipantOptions>,
    config_file: Option<PathBuf>,
}

impl HarnessBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            participant: Participant::builder(),
            options: None,
            config_file: None,
        }
    }

    /// Use these participant options, ignoring any config file.
    pub fn options(mut self, options: ParticipantOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Load participant options from a TOML file at build time.
    ///
    /// Keys missing from the file take their defaults.
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replace the host resolver used by the non-halt fault path.
    pub fn host_resolver(mut self, host: impl HostResolver + 'static) -> Self {
        self.participant = self.participant.host_resolver(host);
        self
    }

    /// Replace the process halt.
    pub fn halt(mut self, halt: impl ProcessHalt + 'static) -> Self {
        self.participant = self.participant.halt(halt);
        self
    }

    /// Build the harness.
    pub fn build(self) -> Result<Harness> {
        let options = match (self.options, self.config_file) {
            (Some(options), _) => options,
            (None, Some(path)) => ParticipantOptions::load(path)?,
            (None, None) => ParticipantOptions::default(),
        };

        let participant = self.participant.options(options).build()?;
        let manager = Arc::new(TransactionManager::new());
        let client = Client::new(Executor::new(Arc::clone(&manager), Arc::clone(&participant)));

        tracing::debug!(options = ?participant.options(), "harness built");
        Ok(Harness {
            manager,
            participant,
            client,
        })
    }
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}
