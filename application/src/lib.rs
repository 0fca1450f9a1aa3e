//! Application layer for duet
//!
//! This crate contains the dialogue use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DialogueParams;
pub use ports::{
    chat_client::{ChatClient, ChatCompletion, ChatOptions, GatewayError},
    progress::{DialogueProgress, NoProgress},
    transcript_writer::{TranscriptError, TranscriptWriter},
};
pub use use_cases::run_dialogue::{
    DialogueOutcome, RunDialogueError, RunDialogueInput, RunDialogueUseCase,
};
