//! Prompt envelope - the message list sent for one attempt.
//!
//! Layout:
//!
//! ```text
//! system     persona
//! system     strict JSON directive          (retry attempt only)
//! system     Topic: ...                     (if a topic is set)
//! system     Conversation summary: ...      (if compaction produced one)
//! assistant  own past output                ┐
//! user       "<other> said:\n..."           ┘ recent tail, in order
//! user       initial prompt                 (only while the context is empty)
//! ```

use crate::core::agent::AgentIdentity;
use crate::dialogue::entry::ConversationEntry;
use crate::session::entities::Message;

const STRICT_JSON_DIRECTIVE: &str =
    "IMPORTANT: output strict JSON only, with no extra characters of any kind.";
const MALFORMED_NOTICE: &str =
    "(Note: the other side's previous output was not valid JSON; its raw output follows)";

/// Inputs for one attempt's prompt
#[derive(Debug, Clone, Copy)]
pub struct PromptEnvelope<'a> {
    pub agent: &'a AgentIdentity,
    pub topic: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub recent: &'a [ConversationEntry],
    /// Opening message; set only while the whole context is still empty
    pub initial_prompt: Option<&'a str>,
    pub strict_json: bool,
}

impl PromptEnvelope<'_> {
    pub fn to_messages(&self) -> Vec<Message> {
        let mut messages = vec![Message::system(self.agent.system_prompt())];

        if self.strict_json {
            messages.push(Message::system(STRICT_JSON_DIRECTIVE));
        }
        if let Some(topic) = self.topic.filter(|t| !t.is_empty()) {
            messages.push(Message::system(format!("Topic: {}", topic)));
        }
        if let Some(summary) = self.summary.filter(|s| !s.is_empty()) {
            messages.push(Message::system(format!("Conversation summary:\n{}", summary)));
        }

        if self.recent.is_empty() {
            if let Some(initial) = self.initial_prompt {
                messages.push(Message::user(initial));
            }
            return messages;
        }

        let speaker = self.agent.name();
        for entry in self.recent {
            if entry.agent == speaker {
                messages.push(Message::assistant(entry.raw_output.as_str()));
                continue;
            }
            let content = if entry.is_valid() {
                entry.raw_output.clone()
            } else {
                format!("{}\n{}", MALFORMED_NOTICE, entry.raw_output)
            };
            messages.push(Message::user(format!("{} said:\n{}", entry.agent, content)));
        }

        messages
    }
}
