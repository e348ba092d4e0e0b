//! Participant options
//!
//! Options can be built in code or loaded from a TOML file:
//!
//! ```toml
//! halt_marker = "HALT"
//! halt_exit_code = 1
//! fault_message_prefix = "fault injected on host"
//! ```
//!
//! Missing keys take their default; unknown keys are rejected.

use serde::{Deserialize, Serialize};
use std::path::Path;
use xa_core::{Error, Result};

/// Fault-injection behaviour of a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticipantOptions {
    /// A fault kind containing this substring halts the process
    pub halt_marker: String,
    /// Exit status reported by a halted process
    pub halt_exit_code: i32,
    /// Text preceding the host name in the non-halt fault reply
    pub fault_message_prefix: String,
}

impl Default for ParticipantOptions {
    fn default() -> Self {
        ParticipantOptions {
            halt_marker: "HALT".to_string(),
            halt_exit_code: 1,
            fault_message_prefix: "fault injected on host".to_string(),
        }
    }
}

impl ParticipantOptions {
    /// Parse options from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: ParticipantOptions =
            toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Replace the halt marker
    pub fn with_halt_marker(mut self, marker: impl Into<String>) -> Self {
        self.halt_marker = marker.into();
        self
    }

    /// Replace the exit status used when halting
    pub fn with_halt_exit_code(mut self, code: i32) -> Self {
        self.halt_exit_code = code;
        self
    }

    /// Check the options are usable
    ///
    /// An empty halt marker is rejected: every fault kind contains it, so
    /// every fault request would kill the process.
    pub fn validate(&self) -> Result<()> {
        if self.halt_marker.is_empty() {
            return Err(Error::Config("halt_marker must not be empty".to_string()));
        }
        Ok(())
    }

    /// Check whether a fault kind requests a halt
    pub fn is_halt(&self, kind: &str) -> bool {
        kind.contains(&self.halt_marker)
    }
}
