//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for duet
#[derive(Parser, Debug, Default)]
#[command(name = "duet")]
#[command(author, version, about = "Two LLM agents talk a topic through until both are satisfied")]
#[command(long_about = r#"
Duet runs a bounded dialogue between two LLM agents with different personas.

Each round, Agent A speaks and then Agent B. Every reply must be a JSON
object with a reply, a satisfaction score (0-100), key points and a request
for the other side. Malformed replies are retried once with a stricter
instruction. The run stops when both agents stay at or above the
satisfaction threshold for enough consecutive rounds, or when the round
budget runs out. Every attempt is written to a JSONL transcript.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./duet.toml         Project-level config
3. ~/.config/duet/config.toml   Global config

Example:
  duet --topic "What makes a life well lived?"
  duet -m llama3:8b --agent-b-model qwen3:32b --max-rounds 10
  duet --agent-a-role "a retired nurse" --transcript-path runs/nurse.jsonl
"#)]
pub struct Cli {
    /// Discussion topic (asked interactively when omitted on a terminal)
    #[arg(long)]
    pub topic: Option<String>,

    /// Model used by both agents
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the chat server used by both agents
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Model for Agent A (defaults to --model)
    #[arg(long, value_name = "MODEL")]
    pub agent_a_model: Option<String>,

    /// Model for Agent B (defaults to --model)
    #[arg(long, value_name = "MODEL")]
    pub agent_b_model: Option<String>,

    /// Base URL for Agent A (defaults to --base-url)
    #[arg(long, value_name = "URL")]
    pub agent_a_base_url: Option<String>,

    /// Base URL for Agent B (defaults to --base-url)
    #[arg(long, value_name = "URL")]
    pub agent_b_base_url: Option<String>,

    /// Role supplement appended to Agent A's persona
    #[arg(long, value_name = "ROLE")]
    pub agent_a_role: Option<String>,

    /// Role supplement appended to Agent B's persona
    #[arg(long, value_name = "ROLE")]
    pub agent_b_role: Option<String>,

    /// Maximum number of rounds
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Minimum satisfaction both agents must reach (0-100)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_sat: Option<u8>,

    /// Consecutive satisfied rounds required to stop
    #[arg(long, value_name = "N")]
    pub stable_rounds: Option<usize>,

    /// Context entries kept verbatim in each prompt
    #[arg(long, value_name = "N")]
    pub summary_keep_last: Option<usize>,

    /// Maximum bullet points in the rolling summary (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub summary_max_points: Option<usize>,

    /// Transcript output file (default: transcript_<timestamp>.jsonl)
    #[arg(long, value_name = "PATH")]
    pub transcript_path: Option<PathBuf>,

    /// HTTP read timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout_s: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
