//! Port for persisting the transcript.
//!
//! The transcript is written once, after the round loop exits. This is
//! separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures every attempt in a
//! machine-readable format (one JSON record per line).

use duet_domain::Transcript;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a transcript
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Could not write transcript to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Durable storage for a finished run's transcript
pub trait TranscriptWriter: Send + Sync {
    /// Write every entry, overwriting any existing file. Returns where it went.
    fn write(&self, transcript: &Transcript) -> Result<PathBuf, TranscriptError>;
}
