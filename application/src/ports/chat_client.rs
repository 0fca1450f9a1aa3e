//! Chat client port
//!
//! Defines the interface for streaming chat completions from a model endpoint.

use async_trait::async_trait;
use duet_domain::Message;
use thiserror::Error;

/// Generation options forwarded to the endpoint (temperature, num_predict, ...)
pub type ChatOptions = serde_json::Map<String, serde_json::Value>;

/// Transport-level failures of a chat call.
///
/// None of these are retried by the client; the orchestrator decides what a
/// failed call means for the run.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout after {0}s without data")]
    Timeout(u64),

    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Fully aggregated result of one streaming call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatCompletion {
    /// Concatenation of every text fragment, in arrival order
    pub text: String,
    /// Every non-empty line received, including ones that failed to decode
    pub raw_lines: Vec<String>,
}

/// Streaming chat endpoint for one agent
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Model identifier requests are sent for
    fn model(&self) -> &str;

    /// Send `messages` and stream the reply.
    ///
    /// `on_chunk` is called once per non-empty text fragment, in arrival
    /// order; the fragments concatenate to [`ChatCompletion::text`].
    async fn stream_chat(
        &self,
        messages: &[Message],
        options: Option<&ChatOptions>,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<ChatCompletion, GatewayError>;
}
