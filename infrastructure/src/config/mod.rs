//! Configuration file loading for duet
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./duet.toml` or `./.duet.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/duet/config.toml`
//! 4. Fallback: `~/.config/duet/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TOPIC, FileAgentConfig,
    FileConfig, FileDialogueConfig, FileEndpointConfig, FileTranscriptConfig,
};
pub use loader::ConfigLoader;
