//! Application-level configuration.
//!
//! - [`DialogueParams`] — round loop control (budget, stability rule, compaction)

pub mod dialogue_params;

pub use dialogue_params::DialogueParams;
