//! Console formatter for the end-of-run report

use colored::Colorize;
use duet_application::DialogueOutcome;
use duet_domain::{AgentConclusion, AgentName, FinalReport};

/// Formats the final report for console display
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format the complete outcome: report, stop reason and transcript location
    pub fn format(outcome: &DialogueOutcome) -> String {
        let mut output = Self::format_report(&outcome.report);

        match &outcome.persisted {
            Some(Ok(path)) => output.push_str(&format!(
                "{} {}\n",
                "Transcript:".dimmed(),
                path.display()
            )),
            Some(Err(e)) => output.push_str(&format!("{} {}\n", "Transcript:".red().bold(), e)),
            None => {}
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the report sections only
    pub fn format_report(report: &FinalReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Final Summary"));
        output.push('\n');

        for agent in AgentName::ALL {
            output.push_str(&format!(
                "\n{}\n",
                format!("── {} ──", agent).yellow().bold()
            ));
            output.push_str(&Self::conclusion(report.conclusions.get(agent)));
        }

        output.push_str(&format!("\n{}\n", "Consensus summary:".green().bold()));
        if report.consensus.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for point in &report.consensus {
            output.push_str(&format!("  * {}\n", point));
        }

        if let Some(reasons) = &report.unmet_reasons {
            output.push_str(&format!(
                "\n{}\n",
                "Why the target was not reached:".yellow().bold()
            ));
            for reason in reasons {
                output.push_str(&format!("  - {}\n", reason));
            }
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Stop reason:".cyan().bold(),
            report.stop_reason
        ));

        output
    }

    fn conclusion(conclusion: &AgentConclusion) -> String {
        match conclusion {
            AgentConclusion::KeyPoints(points) => points
                .iter()
                .map(|p| format!("  * {}\n", p))
                .collect(),
            AgentConclusion::Reply(reply) => format!("{}\n", Self::indent(reply, "  ")),
            AgentConclusion::Empty => format!("  {}\n", "(empty conclusion)".dimmed()),
            AgentConclusion::NoValidConclusion => {
                format!("  {}\n", "(no valid conclusion)".red())
            }
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("\n{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
