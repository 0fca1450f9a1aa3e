//! Termination rule for a dialogue.
//!
//! After each round both agents' satisfaction scores are checked against a
//! threshold. The run stops once the threshold has held for a required
//! number of consecutive rounds, or when the round budget runs out.

use crate::core::agent::AgentName;
use serde::{Deserialize, Serialize};

/// When a dialogue counts as converged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityRule {
    /// Both agents must report at least this satisfaction (0-100)
    pub min_satisfaction: u8,
    /// Number of consecutive satisfied rounds needed to stop
    pub required_rounds: usize,
}

impl Default for StabilityRule {
    fn default() -> Self {
        Self {
            min_satisfaction: 95,
            required_rounds: 2,
        }
    }
}

impl StabilityRule {
    /// A round is stable only if both agents have a score and both meet the threshold.
    pub fn is_stable_round(&self, agent_a: Option<u8>, agent_b: Option<u8>) -> bool {
        match (agent_a, agent_b) {
            (Some(a), Some(b)) => a >= self.min_satisfaction && b >= self.min_satisfaction,
            _ => false,
        }
    }
}

/// Consecutive-stable-round counter
#[derive(Debug, Clone)]
pub struct StabilityTracker {
    rule: StabilityRule,
    consecutive: usize,
}

impl StabilityTracker {
    pub fn new(rule: StabilityRule) -> Self {
        Self {
            rule,
            consecutive: 0,
        }
    }

    /// Record one completed round; returns `true` once the target is reached.
    pub fn observe_round(&mut self, agent_a: Option<u8>, agent_b: Option<u8>) -> bool {
        if self.rule.is_stable_round(agent_a, agent_b) {
            self.consecutive += 1;
        } else {
            self.consecutive = 0;
        }
        self.reached()
    }

    pub fn consecutive(&self) -> usize {
        self.consecutive
    }

    pub fn reached(&self) -> bool {
        self.consecutive >= self.rule.required_rounds
    }

    pub fn rule(&self) -> &StabilityRule {
        &self.rule
    }
}

/// Why a dialogue ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopReason {
    /// Both agents stayed at or above the threshold long enough
    StabilityReached { rounds: usize, min_satisfaction: u8 },
    /// The round budget ran out first
    BudgetExhausted { max_rounds: usize },
    /// A chat call failed at the transport level
    TransportFailure {
        agent: AgentName,
        round: usize,
        error: String,
    },
}

impl StopReason {
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, StopReason::TransportFailure { .. })
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::StabilityReached {
                rounds,
                min_satisfaction,
            } => write!(
                f,
                "{} consecutive rounds with both satisfaction >= {}",
                rounds, min_satisfaction
            ),
            StopReason::BudgetExhausted { max_rounds } => write!(
                f,
                "reached max_rounds = {} without meeting the stop condition",
                max_rounds
            ),
            StopReason::TransportFailure {
                agent,
                round,
                error,
            } => write!(f, "{} failed in round {}: {}", agent, round, error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> StabilityRule {
        StabilityRule {
            min_satisfaction: 90,
            required_rounds: 2,
        }
    }

    #[test]
    fn test_stable_round_requires_both_scores() {
        let rule = rule();
        assert!(rule.is_stable_round(Some(90), Some(100)));
        assert!(!rule.is_stable_round(Some(89), Some(100)));
        assert!(!rule.is_stable_round(None, Some(100)));
        assert!(!rule.is_stable_round(Some(95), None));
    }

    #[test]
    fn test_stops_after_second_consecutive_round() {
        let mut tracker = StabilityTracker::new(rule());
        assert!(!tracker.observe_round(Some(95), Some(96)));
        assert_eq!(tracker.consecutive(), 1);
        assert!(tracker.observe_round(Some(95), Some(96)));
    }

    #[test]
    fn test_invalid_round_resets_counter() {
        let mut tracker = StabilityTracker::new(rule());
        tracker.observe_round(Some(95), Some(96));
        assert!(!tracker.observe_round(Some(99), None));
        assert_eq!(tracker.consecutive(), 0);
        assert!(!tracker.observe_round(Some(95), Some(96)));
        assert!(tracker.observe_round(Some(95), Some(96)));
    }

    #[test]
    fn test_stop_reason_display() {
        let reason = StopReason::StabilityReached {
            rounds: 2,
            min_satisfaction: 95,
        };
        assert_eq!(
            reason.to_string(),
            "2 consecutive rounds with both satisfaction >= 95"
        );
        let reason = StopReason::BudgetExhausted { max_rounds: 40 };
        assert!(reason.to_string().contains("max_rounds = 40"));
        assert!(!reason.is_transport_failure());
    }
}
