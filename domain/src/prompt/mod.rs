//! Prompt domain
//!
//! Persona templates and the per-attempt message envelope.

mod envelope;
mod persona;

pub use envelope::PromptEnvelope;
pub use persona::PersonaTemplate;
