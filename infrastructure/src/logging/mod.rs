//! Logging infrastructure — durable transcript output.
//!
//! Provides [`JsonlTranscriptWriter`], a JSONL file writer that implements
//! the [`TranscriptWriter`](duet_application::TranscriptWriter) port.

mod jsonl_transcript;

pub use jsonl_transcript::JsonlTranscriptWriter;
