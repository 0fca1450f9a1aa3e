//! Infrastructure layer for duet
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod chat;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use chat::{Dialect, HttpChatClient};
pub use config::{
    ConfigLoader, ConfigValidationError, DEFAULT_TOPIC, FileAgentConfig, FileConfig,
    FileDialogueConfig, FileEndpointConfig, FileTranscriptConfig,
};
pub use logging::JsonlTranscriptWriter;
