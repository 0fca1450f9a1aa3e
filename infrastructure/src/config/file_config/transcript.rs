//! Transcript configuration from TOML (`[transcript]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw transcript configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTranscriptConfig {
    /// Output file; a timestamped name in the working directory when unset
    pub path: Option<PathBuf>,
}
