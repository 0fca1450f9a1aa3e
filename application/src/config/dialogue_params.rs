//! Dialogue parameters — round loop control.
//!
//! [`DialogueParams`] groups the static parameters that control the round
//! loop in [`RunDialogueUseCase`](crate::use_cases::run_dialogue::RunDialogueUseCase).

use crate::ports::chat_client::ChatOptions;
use duet_domain::{CompactionPolicy, StabilityRule};
use serde::{Deserialize, Serialize};

/// Round loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueParams {
    /// Hard round budget.
    pub max_rounds: usize,
    /// Both agents must report at least this satisfaction for a stable round.
    pub min_satisfaction: u8,
    /// Consecutive stable rounds required to stop.
    pub stable_rounds: usize,
    /// Context entries kept verbatim in each prompt.
    pub summary_keep_last: usize,
    /// Maximum summary bullet points (0 disables the cap).
    pub summary_max_points: usize,
    /// Generation options forwarded with every chat call.
    pub options: Option<ChatOptions>,
}

impl Default for DialogueParams {
    fn default() -> Self {
        Self {
            max_rounds: 40,
            min_satisfaction: 95,
            stable_rounds: 2,
            summary_keep_last: 6,
            summary_max_points: 12,
            options: None,
        }
    }
}

impl DialogueParams {
    // ==================== Builder Methods ====================

    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_min_satisfaction(mut self, min: u8) -> Self {
        self.min_satisfaction = min;
        self
    }

    pub fn with_stable_rounds(mut self, rounds: usize) -> Self {
        self.stable_rounds = rounds;
        self
    }

    pub fn with_summary_keep_last(mut self, keep_last: usize) -> Self {
        self.summary_keep_last = keep_last;
        self
    }

    pub fn with_summary_max_points(mut self, max_points: usize) -> Self {
        self.summary_max_points = max_points;
        self
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = if options.is_empty() { None } else { Some(options) };
        self
    }

    // ==================== Derived Policies ====================

    pub fn stability_rule(&self) -> StabilityRule {
        StabilityRule {
            min_satisfaction: self.min_satisfaction,
            required_rounds: self.stable_rounds,
        }
    }

    pub fn compaction_policy(&self) -> CompactionPolicy {
        CompactionPolicy {
            keep_last: self.summary_keep_last,
            max_points: self.summary_max_points,
        }
    }

    /// Check the invariants the round loop relies on.
    pub fn validate(&self) -> Result<(), String> {
        if self.stable_rounds == 0 {
            return Err("stable_rounds must be at least 1".to_string());
        }
        if self.min_satisfaction > 100 {
            return Err(format!(
                "min_satisfaction must be within 0..=100, got {}",
                self.min_satisfaction
            ));
        }
        Ok(())
    }
}
