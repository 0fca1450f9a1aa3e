//! Run Dialogue use case
//!
//! Drives two agents through alternating turns, round by round, until both
//! stay satisfied long enough or the round budget runs out.
//!
//! Each turn gets at most two attempts. The first failure to produce valid
//! structured output is recorded in the transcript only; a retry runs with a
//! strict JSON directive, and if that fails too the malformed output enters
//! the context so the other agent can see it. A transport failure ends the
//! run after the report and transcript are produced.

use crate::config::DialogueParams;
use crate::ports::chat_client::{ChatClient, GatewayError};
use crate::ports::progress::{DialogueProgress, NoProgress};
use crate::ports::transcript_writer::{TranscriptError, TranscriptWriter};
use duet_domain::{
    AgentIdentity, AgentName, AgentPair, AttemptState, ConversationContext, ConversationEntry,
    FinalReport, PromptEnvelope, StabilityTracker, StopReason, Transcript,
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that prevent a dialogue from starting
#[derive(Error, Debug)]
pub enum RunDialogueError {
    #[error("Invalid dialogue parameters: {0}")]
    InvalidParams(String),
}

/// Input for the RunDialogue use case
#[derive(Debug, Clone)]
pub struct RunDialogueInput {
    /// Topic line added to every prompt
    pub topic: String,
    /// User message for the very first turn
    pub initial_prompt: String,
    /// Persona of each agent
    pub agents: AgentPair<AgentIdentity>,
    pub params: DialogueParams,
}

impl RunDialogueInput {
    pub fn new(
        topic: impl Into<String>,
        initial_prompt: impl Into<String>,
        agents: AgentPair<AgentIdentity>,
    ) -> Self {
        Self {
            topic: topic.into(),
            initial_prompt: initial_prompt.into(),
            agents,
            params: DialogueParams::default(),
        }
    }

    pub fn with_params(mut self, params: DialogueParams) -> Self {
        self.params = params;
        self
    }
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct DialogueOutcome {
    /// Every attempt, in order
    pub transcript: Transcript,
    pub report: FinalReport,
    /// Whether the stability target was met
    pub reached_target: bool,
    /// Rounds whose stability was evaluated
    pub rounds_completed: usize,
    /// Result of persisting the transcript, if a writer is configured
    pub persisted: Option<Result<PathBuf, TranscriptError>>,
}

impl DialogueOutcome {
    pub fn stop_reason(&self) -> &StopReason {
        &self.report.stop_reason
    }

    pub fn transport_failed(&self) -> bool {
        self.report.stop_reason.is_transport_failure()
    }
}

/// Mutable state of one run, owned by the use case for its duration
struct DialogueState {
    transcript: Transcript,
    context: ConversationContext,
    tracker: StabilityTracker,
    rounds_completed: usize,
}

/// Use case for running a two-agent dialogue
pub struct RunDialogueUseCase<C: ChatClient + 'static> {
    clients: AgentPair<Arc<C>>,
    transcript_writer: Option<Arc<dyn TranscriptWriter>>,
}

impl<C: ChatClient + 'static> RunDialogueUseCase<C> {
    pub fn new(clients: AgentPair<Arc<C>>) -> Self {
        Self {
            clients,
            transcript_writer: None,
        }
    }

    pub fn with_transcript_writer(mut self, writer: Arc<dyn TranscriptWriter>) -> Self {
        self.transcript_writer = Some(writer);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunDialogueInput,
    ) -> Result<DialogueOutcome, RunDialogueError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDialogueInput,
        progress: &dyn DialogueProgress,
    ) -> Result<DialogueOutcome, RunDialogueError> {
        input
            .params
            .validate()
            .map_err(RunDialogueError::InvalidParams)?;

        let params = &input.params;
        info!(
            "Starting dialogue: topic='{}', max_rounds={}, A={}, B={}",
            input.topic,
            params.max_rounds,
            self.clients.agent_a.model(),
            self.clients.agent_b.model()
        );

        let mut state = DialogueState {
            transcript: Transcript::new(),
            context: ConversationContext::new(),
            tracker: StabilityTracker::new(params.stability_rule()),
            rounds_completed: 0,
        };

        let stop_reason = self.run_rounds(&input, &mut state, progress).await;
        let reached_target = state.tracker.reached();
        info!("Dialogue ended: {}", stop_reason);

        let last_valid = AgentPair::new(
            state.transcript.latest_valid(AgentName::AgentA),
            state.transcript.latest_valid(AgentName::AgentB),
        );
        let report = FinalReport::build(&state.transcript, last_valid, stop_reason, reached_target);

        let persisted = self.transcript_writer.as_ref().map(|writer| {
            let result = writer.write(&state.transcript);
            match &result {
                Ok(path) => info!("Transcript written to {}", path.display()),
                Err(e) => warn!("{}", e),
            }
            result
        });

        Ok(DialogueOutcome {
            transcript: state.transcript,
            report,
            reached_target,
            rounds_completed: state.rounds_completed,
            persisted,
        })
    }

    /// Run rounds until a stop condition holds.
    async fn run_rounds(
        &self,
        input: &RunDialogueInput,
        state: &mut DialogueState,
        progress: &dyn DialogueProgress,
    ) -> StopReason {
        let params = &input.params;

        for round in 1..=params.max_rounds {
            progress.on_round_start(round, params.max_rounds);
            debug!("Round {} started", round);

            let mut scores = AgentPair::new(None, None);
            for agent in AgentName::ALL {
                match self.run_turn(round, agent, input, state, progress).await {
                    Ok(satisfaction) => *scores.get_mut(agent) = satisfaction,
                    Err(error) => {
                        warn!("{} failed in round {}: {}", agent, round, error);
                        progress.on_transport_error(agent, &error);
                        return StopReason::TransportFailure {
                            agent,
                            round,
                            error: error.to_string(),
                        };
                    }
                }
            }

            let stable = state.tracker.observe_round(scores.agent_a, scores.agent_b);
            state.rounds_completed = round;
            debug!(
                "Round {} stable={} consecutive={}",
                round,
                stable,
                state.tracker.consecutive()
            );
            progress.on_round_complete(round, state.tracker.consecutive());

            if state.tracker.reached() {
                let rule = state.tracker.rule();
                return StopReason::StabilityReached {
                    rounds: rule.required_rounds,
                    min_satisfaction: rule.min_satisfaction,
                };
            }
        }

        StopReason::BudgetExhausted {
            max_rounds: params.max_rounds,
        }
    }

    /// One agent's turn: up to two attempts.
    ///
    /// Returns the satisfaction of the valid entry, or `None` if both
    /// attempts were malformed.
    async fn run_turn(
        &self,
        round: usize,
        agent: AgentName,
        input: &RunDialogueInput,
        state: &mut DialogueState,
        progress: &dyn DialogueProgress,
    ) -> Result<Option<u8>, GatewayError> {
        let identity = input.agents.get(agent);
        let client = self.clients.get(agent);
        let policy = input.params.compaction_policy();
        let mut attempts = AttemptState::default();

        while let Some(attempt) = attempts.current() {
            let messages = {
                let compacted = state.context.compact(policy);
                PromptEnvelope {
                    agent: identity,
                    topic: Some(input.topic.as_str()),
                    summary: compacted.summary.as_deref(),
                    recent: compacted.recent,
                    initial_prompt: state
                        .context
                        .is_empty()
                        .then_some(input.initial_prompt.as_str()),
                    strict_json: attempt.strict_json(),
                }
                .to_messages()
            };

            progress.on_attempt_start(agent, attempt);
            let mut on_chunk = |chunk: &str| progress.on_chunk(agent, chunk);
            let completion = client
                .stream_chat(&messages, input.params.options.as_ref(), &mut on_chunk)
                .await?;

            let entry = ConversationEntry::from_output(
                round,
                agent,
                attempt,
                completion.text,
                completion.raw_lines,
            );
            progress.on_attempt_complete(&entry);
            state.transcript.push(entry.clone());

            if entry.is_valid() {
                let satisfaction = entry.satisfaction();
                debug!("{} round {} satisfaction {:?}", agent, round, satisfaction);
                state.context.push(entry);
                progress.on_turn_complete(agent, satisfaction);
                return Ok(satisfaction);
            }

            warn!(
                "{} round {} {} produced invalid output: {}",
                agent,
                round,
                attempt,
                entry.parse_error().unwrap_or_default()
            );
            attempts = attempts.after_failure();
            if attempts.is_exhausted() {
                state.context.push(entry);
            }
        }

        progress.on_turn_complete(agent, None);
        Ok(None)
    }
}
