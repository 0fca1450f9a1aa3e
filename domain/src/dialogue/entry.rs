//! Conversation entries - one recorded attempt by one agent.

use super::attempt::Attempt;
use super::verdict::{TurnVerdict, validate_turn_output};
use crate::core::agent::AgentName;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Result of validating one attempt's output.
///
/// A malformed entry carries only the error; a parsed entry always carries
/// the verdict. There is no state with both or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Parsed(TurnVerdict),
    Malformed { parse_error: String },
}

/// One attempt by one agent in one round (Entity)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    pub timestamp: DateTime<Utc>,
    pub round: usize,
    pub agent: AgentName,
    pub attempt: Attempt,
    pub raw_output: String,
    /// Transport lines as received, kept for audit
    pub raw_lines: Vec<String>,
    pub outcome: TurnOutcome,
}

impl ConversationEntry {
    /// Validate `raw_output` and record the attempt, stamped with the current time.
    pub fn from_output(
        round: usize,
        agent: AgentName,
        attempt: Attempt,
        raw_output: impl Into<String>,
        raw_lines: Vec<String>,
    ) -> Self {
        let raw_output = raw_output.into();
        let outcome = match validate_turn_output(&raw_output) {
            Ok(verdict) => TurnOutcome::Parsed(verdict),
            Err(e) => TurnOutcome::Malformed {
                parse_error: e.to_string(),
            },
        };
        Self {
            timestamp: Utc::now(),
            round,
            agent,
            attempt,
            raw_output,
            raw_lines,
            outcome,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, TurnOutcome::Parsed(_))
    }

    pub fn verdict(&self) -> Option<&TurnVerdict> {
        match &self.outcome {
            TurnOutcome::Parsed(verdict) => Some(verdict),
            TurnOutcome::Malformed { .. } => None,
        }
    }

    pub fn parse_error(&self) -> Option<&str> {
        match &self.outcome {
            TurnOutcome::Parsed(_) => None,
            TurnOutcome::Malformed { parse_error } => Some(parse_error),
        }
    }

    pub fn satisfaction(&self) -> Option<u8> {
        self.verdict().map(|v| v.satisfaction)
    }

    /// Key points of a parsed entry; empty for malformed ones
    pub fn key_points(&self) -> &[String] {
        self.verdict().map(|v| v.key_points.as_slice()).unwrap_or(&[])
    }

    /// Flat record written as one transcript line
    pub fn to_record(&self) -> TranscriptRecord<'_> {
        let verdict = self.verdict();
        TranscriptRecord {
            timestamp: self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            turn: self.round,
            agent: self.agent,
            attempt: self.attempt.number(),
            raw_output: &self.raw_output,
            raw_lines: &self.raw_lines,
            parse_error: self.parse_error(),
            parsed: verdict,
            satisfaction: verdict.map(|v| v.satisfaction),
            key_points: verdict.map(|v| v.key_points.as_slice()),
            needs_from_other: verdict.map(|v| v.needs_from_other.as_str()),
        }
    }
}

/// Serialized shape of a transcript line.
///
/// Absent values serialize as `null` so every line has the same keys.
#[derive(Debug, Serialize)]
pub struct TranscriptRecord<'a> {
    pub timestamp: String,
    pub turn: usize,
    pub agent: AgentName,
    pub attempt: u8,
    pub raw_output: &'a str,
    pub raw_lines: &'a [String],
    pub parse_error: Option<&'a str>,
    pub parsed: Option<&'a TurnVerdict>,
    pub satisfaction: Option<u8>,
    pub key_points: Option<&'a [String]>,
    pub needs_from_other: Option<&'a str>,
}
