//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types by the
//! binary.

mod agent;
mod dialogue;
mod endpoint;
mod transcript;

pub use agent::FileAgentConfig;
pub use dialogue::{DEFAULT_TOPIC, FileDialogueConfig};
pub use endpoint::{DEFAULT_BASE_URL, DEFAULT_MODEL, FileEndpointConfig};
pub use transcript::FileTranscriptConfig;

use duet_application::ChatOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty ({0})")]
    EmptyModelName(&'static str),

    #[error("stable_rounds must be at least 1")]
    InvalidStableRounds,

    #[error("min_satisfaction must be within 0..=100, got {0}")]
    InvalidMinSatisfaction(u8),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Shared model endpoint
    pub endpoint: FileEndpointConfig,
    /// Agent A overrides
    pub agent_a: FileAgentConfig,
    /// Agent B overrides
    pub agent_b: FileAgentConfig,
    /// Round loop settings
    pub dialogue: FileDialogueConfig,
    /// Transcript output
    pub transcript: FileTranscriptConfig,
    /// Generation options forwarded verbatim to the chat endpoint
    pub generation: ChatOptions,
}

impl FileConfig {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.endpoint.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let models = [
            ("endpoint.model", Some(self.endpoint.model.as_str())),
            ("agent_a.model", self.agent_a.model.as_deref()),
            ("agent_b.model", self.agent_b.model.as_deref()),
        ];
        for (field, model) in models {
            if model.is_some_and(|m| m.trim().is_empty()) {
                return Err(ConfigValidationError::EmptyModelName(field));
            }
        }

        if self.dialogue.stable_rounds == 0 {
            return Err(ConfigValidationError::InvalidStableRounds);
        }
        if self.dialogue.min_satisfaction > 100 {
            return Err(ConfigValidationError::InvalidMinSatisfaction(
                self.dialogue.min_satisfaction,
            ));
        }

        Ok(())
    }
}
