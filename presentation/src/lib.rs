//! Presentation layer for duet
//!
//! This crate contains the CLI definition, live console progress,
//! the final report formatter, and interactive setup prompts.

pub mod cli;
pub mod interactive;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use interactive::{SetupAnswers, SetupPrompter};
pub use output::report::ReportFormatter;
pub use progress::console::ConsoleProgress;
