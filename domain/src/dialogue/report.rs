//! Final report assembled after the round loop exits.

use super::entry::ConversationEntry;
use super::stability::StopReason;
use super::transcript::Transcript;
use crate::core::agent::{AgentName, AgentPair};
use serde::{Deserialize, Serialize};

/// Non-error entries scanned when explaining an unmet target
const UNMET_SCAN_WINDOW: usize = 10;
/// Items quoted per diagnostic line
const UNMET_QUOTE_LIMIT: usize = 5;

/// What an agent ended the dialogue believing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AgentConclusion {
    /// Key points of the agent's latest valid entry
    KeyPoints(Vec<String>),
    /// The entry had no key points; its reply text instead
    Reply(String),
    /// The entry had neither key points nor reply text
    Empty,
    /// The agent never produced a valid entry
    NoValidConclusion,
}

impl AgentConclusion {
    pub fn from_latest(entry: Option<&ConversationEntry>) -> Self {
        let Some(verdict) = entry.and_then(ConversationEntry::verdict) else {
            return AgentConclusion::NoValidConclusion;
        };
        if !verdict.key_points.is_empty() {
            AgentConclusion::KeyPoints(verdict.key_points.clone())
        } else if !verdict.reply.is_empty() {
            AgentConclusion::Reply(verdict.reply.clone())
        } else {
            AgentConclusion::Empty
        }
    }
}

/// End-of-run summary (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    pub conclusions: AgentPairReport,
    /// Union of both agents' final key points, first occurrence wins
    pub consensus: Vec<String>,
    /// Likely causes when the stability target was not reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmet_reasons: Option<Vec<String>>,
    pub stop_reason: StopReason,
}

/// Per-agent conclusions, serialized with agent names as keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPairReport {
    #[serde(rename = "Agent A")]
    pub agent_a: AgentConclusion,
    #[serde(rename = "Agent B")]
    pub agent_b: AgentConclusion,
}

impl AgentPairReport {
    pub fn get(&self, agent: AgentName) -> &AgentConclusion {
        match agent {
            AgentName::AgentA => &self.agent_a,
            AgentName::AgentB => &self.agent_b,
        }
    }
}

impl FinalReport {
    /// Build the report from each agent's latest valid entry and the full transcript.
    pub fn build(
        transcript: &Transcript,
        last_valid: AgentPair<Option<&ConversationEntry>>,
        stop_reason: StopReason,
        reached_target: bool,
    ) -> Self {
        let conclusions = AgentPairReport {
            agent_a: AgentConclusion::from_latest(last_valid.agent_a),
            agent_b: AgentConclusion::from_latest(last_valid.agent_b),
        };
        let consensus = consensus_summary(&last_valid);
        let unmet_reasons = (!reached_target).then(|| infer_unmet_reasons(transcript));

        Self {
            conclusions,
            consensus,
            unmet_reasons,
            stop_reason,
        }
    }
}

/// Deduplicated union of both agents' final key points, in first-seen order.
pub fn consensus_summary(last_valid: &AgentPair<Option<&ConversationEntry>>) -> Vec<String> {
    let mut consensus: Vec<String> = Vec::new();
    for entry in AgentName::ALL.iter().filter_map(|agent| *last_valid.get(*agent)) {
        for point in entry.key_points() {
            if !consensus.contains(point) {
                consensus.push(point.clone());
            }
        }
    }
    consensus
}

/// Explain why the agents did not converge, from the most recent valid entries.
pub fn infer_unmet_reasons(transcript: &Transcript) -> Vec<String> {
    let recent = transcript.recent_valid(UNMET_SCAN_WINDOW);

    let needs: Vec<&str> = recent
        .iter()
        .filter_map(|e| e.verdict())
        .map(|v| v.needs_from_other.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    let points: Vec<&str> = recent
        .iter()
        .flat_map(|e| e.key_points())
        .map(String::as_str)
        .collect();

    let mut reasons = Vec::new();
    if !needs.is_empty() {
        reasons.push(format!(
            "Open requests or clarifications remain: {}",
            last_n(&needs, UNMET_QUOTE_LIMIT).join("; ")
        ));
    }
    if !points.is_empty() {
        reasons.push(format!(
            "Latest key points have not converged: {}",
            last_n(&points, UNMET_QUOTE_LIMIT).join("; ")
        ));
    }
    if reasons.is_empty() {
        reasons.push("Satisfaction was not jointly raised in recent rounds.".to_string());
    }
    reasons
}

fn last_n<'a>(items: &'a [&'a str], n: usize) -> &'a [&'a str] {
    &items[items.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::attempt::Attempt;
    use serde_json::json;

    fn entry(agent: AgentName, reply: &str, points: &[&str], needs: &str) -> ConversationEntry {
        let text = json!({
            "reply_zh_tw": reply,
            "satisfaction": 70,
            "key_points": points,
            "needs_from_other": needs,
        })
        .to_string();
        ConversationEntry::from_output(1, agent, Attempt::First, text, vec![])
    }

    #[test]
    fn test_conclusion_variants() {
        let with_points = entry(AgentName::AgentA, "r", &["p"], "");
        let reply_only = entry(AgentName::AgentA, "just reply", &[], "");
        let blank = entry(AgentName::AgentA, "", &[], "");

        assert_eq!(
            AgentConclusion::from_latest(Some(&with_points)),
            AgentConclusion::KeyPoints(vec!["p".to_string()])
        );
        assert_eq!(
            AgentConclusion::from_latest(Some(&reply_only)),
            AgentConclusion::Reply("just reply".to_string())
        );
        assert_eq!(AgentConclusion::from_latest(Some(&blank)), AgentConclusion::Empty);
        assert_eq!(AgentConclusion::from_latest(None), AgentConclusion::NoValidConclusion);
    }

    #[test]
    fn test_consensus_dedupes_in_first_seen_order() {
        let a = entry(AgentName::AgentA, "r", &["shared", "a-only", "shared"], "");
        let b = entry(AgentName::AgentB, "r", &["b-only", "shared"], "");
        let pair = AgentPair::new(Some(&a), Some(&b));
        assert_eq!(consensus_summary(&pair), vec!["shared", "a-only", "b-only"]);

        let only_b = AgentPair::new(None, Some(&b));
        assert_eq!(consensus_summary(&only_b), vec!["b-only", "shared"]);
    }

    #[test]
    fn test_unmet_reasons_quote_last_five() {
        let mut transcript = Transcript::new();
        for i in 1..=7 {
            let need = format!("need{i}");
            let point = format!("point{i}");
            transcript.push(entry(AgentName::AgentA, "r", &[point.as_str()], &need));
        }
        transcript.push(ConversationEntry::from_output(
            8,
            AgentName::AgentB,
            Attempt::Retry,
            "broken",
            vec![],
        ));

        let reasons = infer_unmet_reasons(&transcript);
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].ends_with("need3; need4; need5; need6; need7"));
        assert!(reasons[1].ends_with("point3; point4; point5; point6; point7"));
    }

    #[test]
    fn test_unmet_reasons_generic_fallback() {
        let mut transcript = Transcript::new();
        transcript.push(entry(AgentName::AgentA, "r", &[], ""));
        let reasons = infer_unmet_reasons(&transcript);
        assert_eq!(
            reasons,
            vec!["Satisfaction was not jointly raised in recent rounds.".to_string()]
        );
    }

    #[test]
    fn test_report_omits_reasons_when_target_reached() {
        let a = entry(AgentName::AgentA, "r", &["x"], "n");
        let mut transcript = Transcript::new();
        transcript.push(a.clone());

        let reached = FinalReport::build(
            &transcript,
            AgentPair::new(Some(&a), None),
            StopReason::StabilityReached {
                rounds: 2,
                min_satisfaction: 95,
            },
            true,
        );
        assert!(reached.unmet_reasons.is_none());
        assert_eq!(reached.conclusions.agent_b, AgentConclusion::NoValidConclusion);

        let unmet = FinalReport::build(
            &transcript,
            AgentPair::new(Some(&a), None),
            StopReason::BudgetExhausted { max_rounds: 1 },
            false,
        );
        assert_eq!(unmet.unmet_reasons.unwrap().len(), 2);
        assert_eq!(unmet.consensus, vec!["x"]);
    }
}
