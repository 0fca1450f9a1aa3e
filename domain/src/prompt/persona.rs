//! Persona templates for the two agents

use crate::core::agent::{AgentIdentity, AgentName, AgentPair};

/// Templates for the agents' system prompts
pub struct PersonaTemplate;

impl PersonaTemplate {
    /// Output schema and safety rules shared by both agents
    pub fn output_rules() -> &'static str {
        r#"You must output strict JSON only, with no extra text or punctuation.
Output JSON schema:
{
  "reply_zh_tw": "Answer as 「理由摘要：...」 followed by 「結論：...」",
  "satisfaction": integer from 0 to 100,
  "key_points": ["key point 1 of this round", "key point 2 of this round"],
  "needs_from_other": "what you want the other side to answer or clarify next round"
}
reply_zh_tw must contain both a rationale summary and a conclusion; do not expand your full reasoning.
Safety: never encourage self-harm or dangerous instructions; if the topic touches on despair, point to general help resources."#
    }

    /// Agent A: existentialist, subjective experience and free choice
    pub fn agent_a() -> String {
        format!(
            "You are Agent A. You lean existentialist and value subjective experience and free choice, \
but you avoid empty rhetoric and must propose actionable principles for living. \
The topic is given by the system. Reply in Traditional Chinese (zh-TW). \
Each round output JSON only, with no extra characters.\n{}",
            Self::output_rules()
        )
    }

    /// Agent B: pragmatist and systems thinker, verifiable methods with empathy
    pub fn agent_b() -> String {
        format!(
            "You are Agent B. You lean pragmatist and systems-minded, asking for verifiable, practical methods \
while staying empathetic. \
The topic is given by the system. Reply in Traditional Chinese (zh-TW). \
Each round output JSON only, with no extra characters.\n{}",
            Self::output_rules()
        )
    }

    /// Opening user message for the first turn of a run
    pub fn initial_prompt(topic: &str) -> String {
        format!("Please begin the conversation. Topic: {}.", topic)
    }

    /// Build both identities, appending an optional role supplement to each persona.
    pub fn identities(role_a: Option<&str>, role_b: Option<&str>) -> AgentPair<AgentIdentity> {
        AgentPair::new(
            Self::identity(AgentName::AgentA, Self::agent_a(), role_a),
            Self::identity(AgentName::AgentB, Self::agent_b(), role_b),
        )
    }

    fn identity(name: AgentName, mut prompt: String, role: Option<&str>) -> AgentIdentity {
        if let Some(role) = role.map(str::trim).filter(|r| !r.is_empty()) {
            prompt.push_str(&format!("\nRole supplement: {}", role));
        }
        AgentIdentity::new(name, prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personas_share_schema_rules() {
        let pair = PersonaTemplate::identities(None, None);
        for agent in AgentName::ALL {
            let prompt = pair.get(agent).system_prompt();
            assert!(prompt.contains(agent.as_str()));
            assert!(prompt.contains("\"needs_from_other\""));
            assert!(!prompt.contains("Role supplement"));
        }
    }

    #[test]
    fn test_role_supplement_appended_to_one_agent() {
        let pair = PersonaTemplate::identities(Some("  a retired nurse "), Some("   "));
        assert!(
            pair.agent_a
                .system_prompt()
                .ends_with("\nRole supplement: a retired nurse")
        );
        assert!(!pair.agent_b.system_prompt().contains("Role supplement"));
    }

    #[test]
    fn test_initial_prompt_mentions_topic() {
        assert_eq!(
            PersonaTemplate::initial_prompt("time"),
            "Please begin the conversation. Topic: time."
        );
    }
}
