//! Domain layer for duet
//!
//! This crate contains the core logic of a two-agent dialogue: structured
//! turn validation, the attempt state machine, transcript and context
//! bookkeeping, context compaction, the stability rule and the final report.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Round**: both agents speak once, Agent A first
//! - **Turn**: one agent's chance to speak, up to two attempts
//! - **Transcript**: every attempt ever made, never truncated
//! - **Context**: the history prompts are built from, compacted before each prompt
//! - **Stability**: both agents at or above the satisfaction threshold for
//!   enough consecutive rounds

pub mod core;
pub mod dialogue;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use crate::core::agent::{AgentIdentity, AgentName, AgentPair};
pub use dialogue::{
    AgentConclusion, AgentPairReport, Attempt, AttemptState, CompactedContext, CompactionPolicy,
    ConversationContext, ConversationEntry, FinalReport, StabilityRule, StabilityTracker,
    StopReason, Transcript, TranscriptRecord, TurnOutcome, TurnVerdict, ValidationError,
    validate_turn_output,
};
pub use prompt::{PersonaTemplate, PromptEnvelope};
pub use session::entities::{Message, Role};
pub use session::stream::StreamEvent;
