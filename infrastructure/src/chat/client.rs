//! HTTP streaming chat client
//!
//! Implements the [`ChatClient`] port over reqwest. Each call opens one
//! streaming request and folds the response lines into a [`ChatCompletion`].

use super::dialect::Dialect;
use super::lines::LineSplitter;
use async_trait::async_trait;
use duet_application::{ChatClient, ChatCompletion, ChatOptions, GatewayError};
use duet_domain::{Message, StreamEvent};
use reqwest::{Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// Chat client for one model on one server
pub struct HttpChatClient {
    http: reqwest::Client,
    model: String,
    base_url: String,
    /// Bound on every single read; resets whenever data arrives
    read_timeout: Duration,
}

impl HttpChatClient {
    pub fn new(
        model: impl Into<String>,
        base_url: impl AsRef<str>,
        read_timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .connect_timeout(read_timeout)
            .build()
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            model: model.into(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            read_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, dialect: Dialect) -> String {
        format!("{}{}", self.base_url, dialect.path())
    }

    /// Send the request in the native dialect, falling back on 404.
    async fn open_stream(
        &self,
        messages: &[Message],
        options: Option<&ChatOptions>,
    ) -> Result<(Dialect, Response), GatewayError> {
        let response = self.send(Dialect::Native, messages, options).await?;
        if response.status() != StatusCode::NOT_FOUND {
            return Ok((Dialect::Native, Self::check_status(response).await?));
        }

        info!(
            "{} not found at {}, retrying with the OpenAI-compatible endpoint",
            Dialect::Native.path(),
            self.base_url
        );
        let response = self
            .send(Dialect::OpenAiCompatible, messages, options)
            .await?;
        Ok((
            Dialect::OpenAiCompatible,
            Self::check_status(response).await?,
        ))
    }

    async fn send(
        &self,
        dialect: Dialect,
        messages: &[Message],
        options: Option<&ChatOptions>,
    ) -> Result<Response, GatewayError> {
        let url = self.url(dialect);
        debug!("POST {} ({} messages)", url, messages.len());

        let request = self
            .http
            .post(&url)
            .json(&dialect.request_body(&self.model, messages, options))
            .send();

        tokio::time::timeout(self.read_timeout, request)
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.request_error(e))
    }

    async fn check_status(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::HttpStatus {
            status: status.as_u16(),
            url,
            body,
        })
    }

    /// Consume the body until a terminal event or the end of the stream.
    async fn read_stream(
        &self,
        dialect: Dialect,
        mut response: Response,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send + '_),
    ) -> Result<ChatCompletion, GatewayError> {
        let mut splitter = LineSplitter::new();
        let mut completion = ChatCompletion::default();

        loop {
            let chunk = tokio::time::timeout(self.read_timeout, response.chunk())
                .await
                .map_err(|_| self.timeout_error())?
                .map_err(|e| GatewayError::StreamError(e.to_string()))?;

            let (lines, closed) = match chunk {
                Some(bytes) => (splitter.push(&bytes), false),
                None => (splitter.finish().into_iter().collect(), true),
            };

            for line in &lines {
                if consume_line(dialect, line, &mut completion, on_chunk)? {
                    return Ok(completion);
                }
            }
            if closed {
                return Ok(completion);
            }
        }
    }

    fn timeout_error(&self) -> GatewayError {
        GatewayError::Timeout(self.read_timeout.as_secs())
    }

    fn request_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            self.timeout_error()
        } else if e.is_connect() {
            GatewayError::Connection(format!("{}: {}", self.base_url, e))
        } else {
            GatewayError::RequestFailed(e.to_string())
        }
    }
}

/// Fold one line into the completion. Returns true once the stream is over.
fn consume_line(
    dialect: Dialect,
    line: &str,
    completion: &mut ChatCompletion,
    on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send + '_),
) -> Result<bool, GatewayError> {
    let Some(decoded) = dialect.decode_line(line) else {
        return Ok(false);
    };
    if let Some(raw) = decoded.raw {
        completion.raw_lines.push(raw.to_string());
    }

    match &decoded.event {
        StreamEvent::Error(message) => Err(GatewayError::StreamError(message.clone())),
        event => {
            if let Some(text) = event.text() {
                completion.text.push_str(text);
                on_chunk(text);
            }
            Ok(event.is_terminal())
        }
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn stream_chat(
        &self,
        messages: &[Message],
        options: Option<&ChatOptions>,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<ChatCompletion, GatewayError> {
        let (dialect, response) = self.open_stream(messages, options).await?;
        let completion = self.read_stream(dialect, response, on_chunk).await?;
        debug!(
            "{} replied with {} chars over {} lines",
            self.model,
            completion.text.len(),
            completion.raw_lines.len()
        );
        Ok(completion)
    }
}
