//! Streaming chat client
//!
//! - [`HttpChatClient`] — [`ChatClient`](duet_application::ChatClient) over HTTP
//! - [`Dialect`] — native and OpenAI-compatible request/response layouts
//! - [`LineSplitter`] — byte chunks to complete text lines

mod client;
mod dialect;
mod lines;

pub use client::HttpChatClient;
pub use dialect::{DecodedLine, Dialect};
pub use lines::LineSplitter;
