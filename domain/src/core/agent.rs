//! Agent value objects
//!
//! A dialogue always has exactly two speakers. [`AgentName`] names them,
//! [`AgentIdentity`] pairs a name with its immutable system prompt, and
//! [`AgentPair`] holds one value per agent so per-agent state never needs a
//! map lookup that could miss.

use serde::{Deserialize, Serialize};

/// One of the two fixed speakers (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentName {
    #[serde(rename = "Agent A")]
    AgentA,
    #[serde(rename = "Agent B")]
    AgentB,
}

impl AgentName {
    /// Speaking order within a round.
    pub const ALL: [AgentName; 2] = [AgentName::AgentA, AgentName::AgentB];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentName::AgentA => "Agent A",
            AgentName::AgentB => "Agent B",
        }
    }
}

impl std::fmt::Display for AgentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").trim() {
            "agent a" | "a" => Ok(AgentName::AgentA),
            "agent b" | "b" => Ok(AgentName::AgentB),
            _ => Err(format!("Unknown agent: {}. Valid: agent-a, agent-b", s)),
        }
    }
}

/// A named agent with its system prompt (Entity, immutable after creation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentIdentity {
    name: AgentName,
    system_prompt: String,
}

impl AgentIdentity {
    pub fn new(name: AgentName, system_prompt: impl Into<String>) -> Self {
        Self {
            name,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn name(&self) -> AgentName {
        self.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

/// One value per agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentPair<T> {
    pub agent_a: T,
    pub agent_b: T,
}

impl<T> AgentPair<T> {
    pub fn new(agent_a: T, agent_b: T) -> Self {
        Self { agent_a, agent_b }
    }

    pub fn get(&self, agent: AgentName) -> &T {
        match agent {
            AgentName::AgentA => &self.agent_a,
            AgentName::AgentB => &self.agent_b,
        }
    }

    pub fn get_mut(&mut self, agent: AgentName) -> &mut T {
        match agent {
            AgentName::AgentA => &mut self.agent_a,
            AgentName::AgentB => &mut self.agent_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_name_serializes_as_display_name() {
        let json = serde_json::to_string(&AgentName::AgentB).unwrap();
        assert_eq!(json, "\"Agent B\"");
        let back: AgentName = serde_json::from_str("\"Agent A\"").unwrap();
        assert_eq!(back, AgentName::AgentA);
    }

    #[test]
    fn test_agent_name_from_str() {
        assert_eq!("agent-a".parse::<AgentName>().unwrap(), AgentName::AgentA);
        assert_eq!("Agent B".parse::<AgentName>().unwrap(), AgentName::AgentB);
        assert!("agent-c".parse::<AgentName>().is_err());
    }

    #[test]
    fn test_pair_get() {
        let mut pair = AgentPair::new(1, 2);
        *pair.get_mut(AgentName::AgentB) += 10;
        assert_eq!(*pair.get(AgentName::AgentA), 1);
        assert_eq!(*pair.get(AgentName::AgentB), 12);
    }
}
