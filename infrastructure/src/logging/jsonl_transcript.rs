//! JSONL file writer for dialogue transcripts.
//!
//! Each [`ConversationEntry`](duet_domain::ConversationEntry) is serialized
//! as a single JSON line via its transcript record. The file is rewritten
//! from scratch on every call.

use duet_application::ports::transcript_writer::{TranscriptError, TranscriptWriter};
use chrono::{DateTime, Utc};
use duet_domain::Transcript;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSONL transcript writer that writes one JSON object per entry.
pub struct JsonlTranscriptWriter {
    path: PathBuf,
}

impl JsonlTranscriptWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writer for `transcript_<YYYYmmdd_HHMMSS>.jsonl` (UTC) in the working directory.
    pub fn timestamped() -> Self {
        Self::new(Self::default_file_name(Utc::now()))
    }

    pub fn default_file_name(now: DateTime<Utc>) -> String {
        format!("transcript_{}.jsonl", now.format("%Y%m%d_%H%M%S"))
    }

    /// Get the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_lines(&self, transcript: &Transcript) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        for entry in transcript.entries() {
            serde_json::to_writer(&mut writer, &entry.to_record())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

impl TranscriptWriter for JsonlTranscriptWriter {
    fn write(&self, transcript: &Transcript) -> Result<PathBuf, TranscriptError> {
        self.write_lines(transcript)
            .map_err(|source| TranscriptError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            "Wrote {} transcript entries to {}",
            transcript.len(),
            self.path.display()
        );
        Ok(self.path.clone())
    }
}
