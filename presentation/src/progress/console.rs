//! Live console output for a running dialogue
//!
//! Streamed agent text goes to stdout as it arrives. While an agent has not
//! produced its first fragment yet, a spinner runs on stderr.

use colored::Colorize;
use duet_application::{DialogueProgress, GatewayError};
use duet_domain::{AgentName, Attempt, ConversationEntry};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Attempt currently being streamed
struct ActiveAttempt {
    agent: AgentName,
    spinner: Option<ProgressBar>,
    header_printed: bool,
}

/// Reports dialogue progress on the console
pub struct ConsoleProgress {
    show_spinner: bool,
    active: Mutex<Option<ActiveAttempt>>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            show_spinner: true,
            active: Mutex::new(None),
        }
    }

    /// Set whether to show the waiting spinner
    pub fn with_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Clear the spinner and print the agent header once per attempt.
    fn ensure_header(&self) {
        let Ok(mut active) = self.active.lock() else {
            return;
        };
        let Some(attempt) = active.as_mut() else {
            return;
        };
        if let Some(spinner) = attempt.spinner.take() {
            spinner.finish_and_clear();
        }
        if !attempt.header_printed {
            attempt.header_printed = true;
            println!("{}", Self::agent_header(attempt.agent));
        }
    }

    fn agent_header(agent: AgentName) -> String {
        let label = format!("{}:", agent);
        match agent {
            AgentName::AgentA => label.blue().bold().to_string(),
            AgentName::AgentB => label.magenta().bold().to_string(),
        }
    }

    /// Drop the active attempt, clearing its spinner. Returns true if streamed
    /// text was already printed for it.
    fn clear_active(active: &Mutex<Option<ActiveAttempt>>) -> bool {
        let Some(attempt) = active.lock().ok().and_then(|mut a| a.take()) else {
            return false;
        };
        if let Some(spinner) = attempt.spinner {
            spinner.finish_and_clear();
        }
        attempt.header_printed
    }

    /// Marker printed after an attempt failed validation
    pub fn attempt_marker(entry: &ConversationEntry) -> Option<String> {
        if entry.is_valid() {
            return None;
        }
        let marker = match entry.attempt {
            Attempt::First => "[invalid JSON, retrying once]".yellow(),
            Attempt::Retry => "[invalid JSON, marked as error]".red(),
        };
        Some(marker.to_string())
    }

    /// Marker printed once an agent's turn is over
    pub fn satisfaction_marker(agent: AgentName, satisfaction: Option<u8>) -> String {
        let score = satisfaction.map_or_else(|| "N/A".to_string(), |s| s.to_string());
        format!("[{} satisfaction: {}]", agent, score)
            .dimmed()
            .to_string()
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueProgress for ConsoleProgress {
    fn on_round_start(&self, round: usize, _max_rounds: usize) {
        println!(
            "\n{}",
            format!("=== Round {} ===", round).cyan().bold()
        );
    }

    fn on_attempt_start(&self, agent: AgentName, attempt: Attempt) {
        let spinner = self.show_spinner.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.set_message(format!("{} is thinking ({})...", agent, attempt));
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        if let Ok(mut active) = self.active.lock() {
            *active = Some(ActiveAttempt {
                agent,
                spinner,
                header_printed: false,
            });
        }
    }

    fn on_chunk(&self, _agent: AgentName, chunk: &str) {
        self.ensure_header();
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(chunk.as_bytes());
        let _ = stdout.flush();
    }

    fn on_attempt_complete(&self, entry: &ConversationEntry) {
        self.ensure_header();
        println!();
        if let Some(marker) = Self::attempt_marker(entry) {
            println!("{}", marker);
        }
    }

    fn on_turn_complete(&self, agent: AgentName, satisfaction: Option<u8>) {
        if let Ok(mut active) = self.active.lock() {
            *active = None;
        }
        println!("{}", Self::satisfaction_marker(agent, satisfaction));
    }

    fn on_transport_error(&self, agent: AgentName, error: &GatewayError) {
        if Self::clear_active(&self.active) {
            println!();
        }
        eprintln!(
            "{} {} request failed: {}",
            "x".red(),
            agent,
            error
        );
    }
}
