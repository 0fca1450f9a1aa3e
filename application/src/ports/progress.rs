//! Progress notification port
//!
//! Defines the interface for reporting progress during a dialogue run.

use super::chat_client::GatewayError;
use duet_domain::{AgentName, Attempt, ConversationEntry};

/// Callback for progress updates during a dialogue
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, log, etc.)
pub trait DialogueProgress: Send + Sync {
    /// Called when a round starts
    fn on_round_start(&self, round: usize, max_rounds: usize);

    /// Called before each chat call
    fn on_attempt_start(&self, agent: AgentName, attempt: Attempt);

    /// Called for each streamed text fragment
    fn on_chunk(&self, agent: AgentName, chunk: &str);

    /// Called after an attempt's output has been validated
    fn on_attempt_complete(&self, entry: &ConversationEntry);

    /// Called when the turn is over. `satisfaction` is `None` for an invalid turn.
    fn on_turn_complete(&self, agent: AgentName, satisfaction: Option<u8>);

    /// Called when a chat call fails at the transport level
    fn on_transport_error(&self, _agent: AgentName, _error: &GatewayError) {}

    /// Called after the stability rule has been evaluated for a round
    fn on_round_complete(&self, _round: usize, _consecutive_stable: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DialogueProgress for NoProgress {
    fn on_round_start(&self, _round: usize, _max_rounds: usize) {}
    fn on_attempt_start(&self, _agent: AgentName, _attempt: Attempt) {}
    fn on_chunk(&self, _agent: AgentName, _chunk: &str) {}
    fn on_attempt_complete(&self, _entry: &ConversationEntry) {}
    fn on_turn_complete(&self, _agent: AgentName, _satisfaction: Option<u8>) {}
}
