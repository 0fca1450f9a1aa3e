//! Streaming events decoded from a chat response.
//!
//! Each non-empty line of a streaming response decodes to exactly one
//! [`StreamEvent`]. The infrastructure line decoder produces them; the chat
//! client folds them into an aggregated reply.

/// One decoded line of a streaming chat response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental text fragment (may be empty, e.g. a role-only delta).
    Delta(String),
    /// The last record of the stream, with any fragment it still carried.
    Completed(String),
    /// The record carried an explicit error field; aggregation must abort.
    Error(String),
    /// An end-of-stream sentinel with no payload.
    Done,
    /// The line could not be decoded. It is kept as a raw line and ignored.
    Unparsed,
}

impl StreamEvent {
    /// Returns the fragment if this event carries non-empty text.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) | StreamEvent::Completed(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Returns true if no further lines should be consumed after this event.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StreamEvent::Completed(_) | StreamEvent::Done | StreamEvent::Error(_)
        )
    }
}
