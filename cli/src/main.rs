//! CLI entrypoint for duet
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use duet_application::{ChatClient, RunDialogueInput, RunDialogueUseCase};
use duet_domain::{AgentPair, PersonaTemplate};
use duet_infrastructure::{
    ConfigLoader, DEFAULT_TOPIC, FileConfig, HttpChatClient, JsonlTranscriptWriter,
};
use duet_presentation::{Cli, ConsoleProgress, ReportFormatter, SetupAnswers, SetupPrompter};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate()?;

    let answers = SetupAnswers {
        topic: config.dialogue.topic.clone(),
        agent_a_role: config.agent_a.role.clone(),
        agent_b_role: config.agent_b.role.clone(),
    };
    let answers = match SetupPrompter::for_terminal() {
        Some(mut prompter) => prompter.complete(answers, DEFAULT_TOPIC)?,
        None => answers,
    };
    let topic = answers.topic.unwrap_or_else(|| DEFAULT_TOPIC.to_string());

    info!("Starting duet on '{}'", topic);

    // === Dependency Injection ===
    let timeout = Duration::from_secs(config.endpoint.timeout_seconds);
    let clients = AgentPair::new(
        Arc::new(HttpChatClient::new(
            config.agent_a.model(&config.endpoint),
            config.agent_a.base_url(&config.endpoint),
            timeout,
        )?),
        Arc::new(HttpChatClient::new(
            config.agent_b.model(&config.endpoint),
            config.agent_b.base_url(&config.endpoint),
            timeout,
        )?),
    );
    let writer = match &config.transcript.path {
        Some(path) => JsonlTranscriptWriter::new(path),
        None => JsonlTranscriptWriter::timestamped(),
    };

    let input = RunDialogueInput::new(
        topic.clone(),
        PersonaTemplate::initial_prompt(&topic),
        PersonaTemplate::identities(
            answers.agent_a_role.as_deref(),
            answers.agent_b_role.as_deref(),
        ),
    )
    .with_params(config.dialogue.to_params(&config.generation));

    if !cli.quiet {
        println!();
        println!("Topic:   {}", topic);
        println!(
            "Agent A: {} @ {}",
            clients.agent_a.model(),
            clients.agent_a.base_url()
        );
        println!(
            "Agent B: {} @ {}",
            clients.agent_b.model(),
            clients.agent_b.base_url()
        );
        println!("Transcript: {}", writer.path().display());
    }

    let use_case = RunDialogueUseCase::new(clients).with_transcript_writer(Arc::new(writer));
    let progress = ConsoleProgress::new().with_spinner(!cli.quiet);
    let outcome = use_case.execute_with_progress(input, &progress).await?;

    println!("{}", ReportFormatter::format(&outcome));

    if outcome.transport_failed() {
        bail!("{}", outcome.stop_reason());
    }
    if let Some(Err(e)) = &outcome.persisted {
        bail!("{}", e);
    }

    Ok(())
}

/// Command-line flags take precedence over every config file.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.endpoint.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.endpoint.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout_s {
        config.endpoint.timeout_seconds = timeout;
    }

    for (agent, model, base_url, role) in [
        (
            &mut config.agent_a,
            &cli.agent_a_model,
            &cli.agent_a_base_url,
            &cli.agent_a_role,
        ),
        (
            &mut config.agent_b,
            &cli.agent_b_model,
            &cli.agent_b_base_url,
            &cli.agent_b_role,
        ),
    ] {
        if model.is_some() {
            agent.model = model.clone();
        }
        if base_url.is_some() {
            agent.base_url = base_url.clone();
        }
        if role.is_some() {
            agent.role = role.clone();
        }
    }

    let dialogue = &mut config.dialogue;
    if cli.topic.is_some() {
        dialogue.topic = cli.topic.clone();
    }
    if let Some(max_rounds) = cli.max_rounds {
        dialogue.max_rounds = max_rounds;
    }
    if let Some(min_sat) = cli.min_sat {
        dialogue.min_satisfaction = min_sat;
    }
    if let Some(stable_rounds) = cli.stable_rounds {
        dialogue.stable_rounds = stable_rounds;
    }
    if let Some(keep_last) = cli.summary_keep_last {
        dialogue.summary_keep_last = keep_last;
    }
    if let Some(max_points) = cli.summary_max_points {
        dialogue.summary_max_points = max_points;
    }

    if cli.transcript_path.is_some() {
        config.transcript.path = cli.transcript_path.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file_config() {
        let mut config = FileConfig::default();
        config.agent_b.model = Some("from-file".to_string());
        config.dialogue.max_rounds = 12;

        let cli = Cli::try_parse_from([
            "duet",
            "-m",
            "shared",
            "--agent-a-role",
            "a poet",
            "--stable-rounds",
            "3",
        ])
        .unwrap();
        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.agent_a.model(&config.endpoint), "shared");
        assert_eq!(config.agent_b.model(&config.endpoint), "from-file");
        assert_eq!(config.agent_a.role.as_deref(), Some("a poet"));
        assert_eq!(config.dialogue.stable_rounds, 3);
        assert_eq!(config.dialogue.max_rounds, 12);
        assert!(config.transcript.path.is_none());
    }

    #[test]
    fn test_zero_stable_rounds_fails_validation() {
        let mut config = FileConfig::default();
        let cli = Cli::try_parse_from(["duet", "--stable-rounds", "0"]).unwrap();
        apply_cli_overrides(&mut config, &cli);
        assert!(config.validate().is_err());
    }
}
