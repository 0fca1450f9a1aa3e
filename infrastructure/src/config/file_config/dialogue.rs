//! Dialogue configuration from TOML (`[dialogue]` section)

use duet_application::{ChatOptions, DialogueParams};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOPIC: &str = "the meaning of life";

/// Raw dialogue configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDialogueConfig {
    /// Topic; when unset the user is asked (or the default is used)
    pub topic: Option<String>,
    pub max_rounds: usize,
    pub min_satisfaction: u8,
    pub stable_rounds: usize,
    pub summary_keep_last: usize,
    pub summary_max_points: usize,
}

impl Default for FileDialogueConfig {
    fn default() -> Self {
        let params = DialogueParams::default();
        Self {
            topic: None,
            max_rounds: params.max_rounds,
            min_satisfaction: params.min_satisfaction,
            stable_rounds: params.stable_rounds,
            summary_keep_last: params.summary_keep_last,
            summary_max_points: params.summary_max_points,
        }
    }
}

impl FileDialogueConfig {
    /// Convert to the use case's loop parameters.
    pub fn to_params(&self, options: &ChatOptions) -> DialogueParams {
        DialogueParams::default()
            .with_max_rounds(self.max_rounds)
            .with_min_satisfaction(self.min_satisfaction)
            .with_stable_rounds(self.stable_rounds)
            .with_summary_keep_last(self.summary_keep_last)
            .with_summary_max_points(self.summary_max_points)
            .with_options(options.clone())
    }
}
