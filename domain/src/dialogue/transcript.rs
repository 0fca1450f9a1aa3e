//! Append-only record of every attempt in a run.

use super::entry::ConversationEntry;
use crate::core::agent::AgentName;

/// Every [`ConversationEntry`] produced during a run, including failed first
/// attempts. Entries are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<ConversationEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent parsed entry for `agent`, by transcript order
    pub fn latest_valid(&self, agent: AgentName) -> Option<&ConversationEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.agent == agent && e.is_valid())
    }

    /// The last `limit` parsed entries, oldest first
    pub fn recent_valid(&self, limit: usize) -> Vec<&ConversationEntry> {
        let valid: Vec<_> = self.entries.iter().filter(|e| e.is_valid()).collect();
        let start = valid.len().saturating_sub(limit);
        valid[start..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::attempt::Attempt;

    fn valid(round: usize, agent: AgentName, sat: u8) -> ConversationEntry {
        let text = format!(
            r#"{{"reply_zh_tw":"r{round}","satisfaction":{sat},"key_points":[],"needs_from_other":""}}"#
        );
        ConversationEntry::from_output(round, agent, Attempt::First, text, vec![])
    }

    fn broken(round: usize, agent: AgentName, attempt: Attempt) -> ConversationEntry {
        ConversationEntry::from_output(round, agent, attempt, "nope", vec![])
    }

    #[test]
    fn test_latest_valid_skips_failures() {
        let mut transcript = Transcript::new();
        transcript.push(valid(1, AgentName::AgentA, 40));
        transcript.push(valid(1, AgentName::AgentB, 50));
        transcript.push(broken(2, AgentName::AgentA, Attempt::First));
        transcript.push(broken(2, AgentName::AgentA, Attempt::Retry));

        let latest = transcript.latest_valid(AgentName::AgentA).unwrap();
        assert_eq!(latest.round, 1);
        assert_eq!(latest.satisfaction(), Some(40));
        assert_eq!(transcript.len(), 4);
    }

    #[test]
    fn test_latest_valid_none_when_never_parsed() {
        let mut transcript = Transcript::new();
        transcript.push(broken(1, AgentName::AgentB, Attempt::First));
        assert!(transcript.latest_valid(AgentName::AgentB).is_none());
        assert!(transcript.latest_valid(AgentName::AgentA).is_none());
    }

    #[test]
    fn test_recent_valid_keeps_order_and_limit() {
        let mut transcript = Transcript::new();
        for round in 1..=6 {
            transcript.push(valid(round, AgentName::AgentA, round as u8));
            transcript.push(broken(round, AgentName::AgentB, Attempt::First));
        }
        let recent = transcript.recent_valid(3);
        let rounds: Vec<_> = recent.iter().map(|e| e.round).collect();
        assert_eq!(rounds, vec![4, 5, 6]);
        assert_eq!(transcript.recent_valid(100).len(), 6);
    }
}
