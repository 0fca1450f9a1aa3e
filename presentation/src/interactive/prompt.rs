//! Interactive setup prompts
//!
//! Asks for the topic and role supplements that were not given on the
//! command line or in a config file. Only used when stdin is a terminal.

use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use std::io::IsTerminal;

/// Values the user may be asked for before a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupAnswers {
    pub topic: Option<String>,
    pub agent_a_role: Option<String>,
    pub agent_b_role: Option<String>,
}

/// Line editor for the setup questions
pub struct SetupPrompter {
    editor: Reedline,
}

impl SetupPrompter {
    /// Create a prompter if stdin is an interactive terminal
    pub fn for_terminal() -> Option<Self> {
        std::io::stdin().is_terminal().then(|| Self {
            editor: Reedline::create(),
        })
    }

    /// Ask one question. Empty input, Ctrl-C and Ctrl-D all mean "no answer".
    pub fn ask(&mut self, label: &str, default_hint: &str) -> std::io::Result<Option<String>> {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(format!("{} (default: {})", label, default_hint)),
            DefaultPromptSegment::Empty,
        );
        let signal = self.editor.read_line(&prompt)?;
        Ok(answer_from(signal))
    }

    /// Fill in whatever is still missing.
    pub fn complete(
        &mut self,
        mut answers: SetupAnswers,
        default_topic: &str,
    ) -> std::io::Result<SetupAnswers> {
        if answers.topic.is_none() {
            answers.topic = self.ask("Discussion topic", default_topic)?;
        }
        if answers.agent_a_role.is_none() {
            answers.agent_a_role = self.ask("Agent A role supplement", "none")?;
        }
        if answers.agent_b_role.is_none() {
            answers.agent_b_role = self.ask("Agent B role supplement", "none")?;
        }
        Ok(answers)
    }
}

fn answer_from(signal: Signal) -> Option<String> {
    match signal {
        Signal::Success(line) => {
            let line = line.trim();
            (!line.is_empty()).then(|| line.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_is_trimmed() {
        assert_eq!(
            answer_from(Signal::Success("  free will \n".to_string())),
            Some("free will".to_string())
        );
    }

    #[test]
    fn test_blank_or_cancelled_means_no_answer() {
        assert_eq!(answer_from(Signal::Success("   ".to_string())), None);
        assert_eq!(answer_from(Signal::CtrlC), None);
        assert_eq!(answer_from(Signal::CtrlD), None);
    }
}
