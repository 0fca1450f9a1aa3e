//! Shared endpoint configuration from TOML (`[endpoint]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "qwen3:14b";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

/// Endpoint used by both agents unless an agent section overrides it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// Model identifier
    pub model: String,
    /// Base URL of the chat server
    pub base_url: String,
    /// Read timeout per chat call; resets whenever data arrives
    pub timeout_seconds: u64,
}

impl Default for FileEndpointConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 120,
        }
    }
}
