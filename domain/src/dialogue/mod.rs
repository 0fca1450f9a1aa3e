//! Dialogue domain
//!
//! Everything the turn orchestrator reasons about, with no I/O:
//!
//! - [`verdict`] — structured output schema and its validator
//! - [`attempt`] — the two-attempt state machine of a turn
//! - [`entry`] — one recorded attempt, parsed or malformed
//! - [`transcript`] — append-only record of every attempt
//! - [`context`] — prompt history and its compaction
//! - [`stability`] — termination rule and stop reasons
//! - [`report`] — end-of-run conclusions, consensus and diagnostics

pub mod attempt;
pub mod context;
pub mod entry;
pub mod report;
pub mod stability;
pub mod transcript;
pub mod verdict;

pub use attempt::{Attempt, AttemptState};
pub use context::{CompactedContext, CompactionPolicy, ConversationContext};
pub use entry::{ConversationEntry, TranscriptRecord, TurnOutcome};
pub use report::{AgentConclusion, AgentPairReport, FinalReport, consensus_summary, infer_unmet_reasons};
pub use stability::{StabilityRule, StabilityTracker, StopReason};
pub use transcript::Transcript;
pub use verdict::{TurnVerdict, ValidationError, validate_turn_output};
