//! Prompt context and its compaction.
//!
//! The context is the subset of the transcript that future prompts are built
//! from: parsed entries plus second-attempt failures. Before every prompt it
//! is compacted into a verbatim recent tail and a bulleted summary of older
//! key points, so prompt size stays bounded however long the run gets.

use super::entry::ConversationEntry;
use serde::{Deserialize, Serialize};

/// How much context survives verbatim and how large the summary may grow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionPolicy {
    /// Entries kept verbatim at the end of the context
    pub keep_last: usize,
    /// Maximum summary points; 0 disables the cap
    pub max_points: usize,
}

impl Default for CompactionPolicy {
    fn default() -> Self {
        Self {
            keep_last: 6,
            max_points: 12,
        }
    }
}

/// Context entries used to build prompts
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    entries: Vec<ConversationEntry>,
}

/// Result of compacting the context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactedContext<'a> {
    /// Bulleted summary of older key points, if any were found
    pub summary: Option<String>,
    /// Most recent entries, verbatim, oldest first
    pub recent: &'a [ConversationEntry],
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split into a summary of older entries and the verbatim recent tail.
    pub fn compact(&self, policy: CompactionPolicy) -> CompactedContext<'_> {
        let split = self.entries.len().saturating_sub(policy.keep_last);
        let (older, recent) = self.entries.split_at(split);

        CompactedContext {
            summary: summarize(older, policy.max_points),
            recent,
        }
    }
}

/// Collect key points from `older` (reply text when an entry has none),
/// keep the last `max_points`, and render them as `- point` lines.
fn summarize(older: &[ConversationEntry], max_points: usize) -> Option<String> {
    let mut points: Vec<&str> = Vec::new();
    for verdict in older.iter().filter_map(ConversationEntry::verdict) {
        if !verdict.key_points.is_empty() {
            points.extend(verdict.key_points.iter().map(String::as_str));
        } else if !verdict.reply.is_empty() {
            points.push(&verdict.reply);
        }
    }

    if points.is_empty() {
        return None;
    }

    if max_points > 0 && points.len() > max_points {
        points.drain(..points.len() - max_points);
    }

    Some(
        points
            .iter()
            .map(|p| format!("- {}", p))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
