//! Chat session domain.
//!
//! - [`entities::Message`] — a single role-tagged message sent to the chat endpoint
//! - [`stream::StreamEvent`] — one decoded line of a streaming response

pub mod entities;
pub mod stream;
