//! Attempt state machine for a single turn.
//!
//! A turn gets at most two attempts. The second one runs with the strict
//! JSON directive; a failure there ends the turn in [`AttemptState::GaveUp`],
//! which has no current attempt, so a third call cannot be expressed.
//!
//! ```text
//! FirstAttempt ──fail──▶ RetryAttempt ──fail──▶ GaveUp
//!      │                      │
//!      └──ok──▶ done          └──ok──▶ done
//! ```

use serde::{Deserialize, Serialize};

/// Which attempt produced an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attempt {
    First,
    Retry,
}

impl Attempt {
    /// 1-based attempt number, as recorded in transcripts
    pub fn number(&self) -> u8 {
        match self {
            Attempt::First => 1,
            Attempt::Retry => 2,
        }
    }

    /// Whether the prompt carries the extra strict JSON directive
    pub fn strict_json(&self) -> bool {
        matches!(self, Attempt::Retry)
    }
}

impl std::fmt::Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "attempt {}", self.number())
    }
}

/// Progress of a turn through its attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttemptState {
    #[default]
    FirstAttempt,
    RetryAttempt,
    GaveUp,
}

impl AttemptState {
    /// The attempt to run now, or `None` once the turn has given up
    pub fn current(&self) -> Option<Attempt> {
        match self {
            AttemptState::FirstAttempt => Some(Attempt::First),
            AttemptState::RetryAttempt => Some(Attempt::Retry),
            AttemptState::GaveUp => None,
        }
    }

    /// Transition after the current attempt produced invalid output
    pub fn after_failure(self) -> AttemptState {
        match self {
            AttemptState::FirstAttempt => AttemptState::RetryAttempt,
            AttemptState::RetryAttempt | AttemptState::GaveUp => AttemptState::GaveUp,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, AttemptState::GaveUp)
    }
}
