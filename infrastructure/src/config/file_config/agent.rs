//! Per-agent configuration from TOML (`[agent_a]` / `[agent_b]` sections)

use super::endpoint::FileEndpointConfig;
use serde::{Deserialize, Serialize};

/// Overrides for one agent. Unset fields fall back to `[endpoint]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Appended to the persona as a role supplement
    pub role: Option<String>,
}

impl FileAgentConfig {
    pub fn model<'a>(&'a self, endpoint: &'a FileEndpointConfig) -> &'a str {
        self.model.as_deref().unwrap_or(&endpoint.model)
    }

    pub fn base_url<'a>(&'a self, endpoint: &'a FileEndpointConfig) -> &'a str {
        self.base_url.as_deref().unwrap_or(&endpoint.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_back_to_endpoint() {
        let endpoint = FileEndpointConfig::default();
        let agent = FileAgentConfig {
            model: Some("llama3".to_string()),
            ..Default::default()
        };
        assert_eq!(agent.model(&endpoint), "llama3");
        assert_eq!(agent.base_url(&endpoint), "http://127.0.0.1:11434");
    }
}
