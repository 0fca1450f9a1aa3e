//! Interactive prompting before a run

mod prompt;

pub use prompt::{SetupAnswers, SetupPrompter};
