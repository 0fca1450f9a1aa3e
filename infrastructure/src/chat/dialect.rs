//! Wire dialects of the chat endpoint.
//!
//! The server is first addressed in its native dialect (`/api/chat`,
//! newline-delimited JSON records). When that path answers 404 the same
//! request is repeated in the OpenAI-compatible dialect
//! (`/v1/chat/completions`, `data:`-prefixed lines ending in `[DONE]`).

use duet_application::ChatOptions;
use duet_domain::{Message, StreamEvent};
use serde_json::{Value, json};

const SSE_PREFIX: &str = "data:";
const SSE_DONE: &str = "[DONE]";

/// Request/response layout of one endpoint path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Native,
    OpenAiCompatible,
}

/// One non-empty response line after dialect handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLine<'a> {
    /// Text kept in the raw line list; `None` for the end-of-stream sentinel
    pub raw: Option<&'a str>,
    pub event: StreamEvent,
}

impl Dialect {
    pub fn path(&self) -> &'static str {
        match self {
            Dialect::Native => "/api/chat",
            Dialect::OpenAiCompatible => "/v1/chat/completions",
        }
    }

    /// Streaming request body for this dialect.
    ///
    /// Native requests nest options under `options`; OpenAI-compatible ones
    /// carry them at the top level, with `num_predict` renamed to `max_tokens`.
    pub fn request_body(
        &self,
        model: &str,
        messages: &[Message],
        options: Option<&ChatOptions>,
    ) -> Value {
        let mut body = json!({
            "model": model,
            "messages": messages,
            "stream": true,
        });
        let Some(options) = options.filter(|o| !o.is_empty()) else {
            return body;
        };

        match self {
            Dialect::Native => {
                body["options"] = Value::Object(options.clone());
            }
            Dialect::OpenAiCompatible => {
                if let Value::Object(map) = &mut body {
                    for (key, value) in options {
                        let key = match key.as_str() {
                            "num_predict" => "max_tokens",
                            other => other,
                        };
                        map.insert(key.to_string(), value.clone());
                    }
                }
            }
        }
        body
    }

    /// Decode one response line. Blank lines yield `None`.
    pub fn decode_line<'a>(&self, line: &'a str) -> Option<DecodedLine<'a>> {
        if line.is_empty() {
            return None;
        }

        let payload = match self {
            Dialect::Native => line,
            Dialect::OpenAiCompatible => match line.strip_prefix(SSE_PREFIX) {
                Some(rest) => {
                    let rest = rest.trim();
                    if rest == SSE_DONE {
                        return Some(DecodedLine {
                            raw: None,
                            event: StreamEvent::Done,
                        });
                    }
                    rest
                }
                None => line,
            },
        };

        Some(DecodedLine {
            raw: Some(payload),
            event: self.decode_record(payload),
        })
    }

    fn decode_record(&self, payload: &str) -> StreamEvent {
        let Ok(Value::Object(record)) = serde_json::from_str::<Value>(payload) else {
            return StreamEvent::Unparsed;
        };

        match record.get("error") {
            None | Some(Value::Null) => {}
            Some(Value::String(message)) => return StreamEvent::Error(message.clone()),
            Some(other) => return StreamEvent::Error(other.to_string()),
        }

        let record = Value::Object(record);
        let pointer = match self {
            Dialect::Native => "/message/content",
            Dialect::OpenAiCompatible => "/choices/0/delta/content",
        };
        let text = record
            .pointer(pointer)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let done = record.get("done").and_then(Value::as_bool) == Some(true);
        if *self == Dialect::Native && done {
            StreamEvent::Completed(text)
        } else {
            StreamEvent::Delta(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ChatOptions {
        let mut options = ChatOptions::new();
        options.insert("temperature".to_string(), json!(0.5));
        options.insert("num_predict".to_string(), json!(256));
        options
    }

    // ==================== Requests ====================

    #[test]
    fn test_native_body_nests_options() {
        let body = Dialect::Native.request_body("m", &[Message::user("hi")], Some(&options()));
        assert_eq!(body["model"], "m");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["options"]["num_predict"], 256);
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_openai_body_flattens_and_renames_options() {
        let body =
            Dialect::OpenAiCompatible.request_body("m", &[Message::user("hi")], Some(&options()));
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["max_tokens"], 256);
        assert!(body.get("num_predict").is_none());
        assert!(body.get("options").is_none());
    }

    #[test]
    fn test_empty_options_are_omitted() {
        let body = Dialect::Native.request_body("m", &[], Some(&ChatOptions::new()));
        assert!(body.get("options").is_none());
    }

    // ==================== Native lines ====================

    #[test]
    fn test_native_delta_and_done() {
        let line = r#"{"message":{"role":"assistant","content":"Hel"},"done":false}"#;
        let decoded = Dialect::Native.decode_line(line).unwrap();
        assert_eq!(decoded.raw, Some(line));
        assert_eq!(decoded.event, StreamEvent::Delta("Hel".to_string()));

        let line = r#"{"message":{"content":""},"done":true}"#;
        let decoded = Dialect::Native.decode_line(line).unwrap();
        assert_eq!(decoded.event, StreamEvent::Completed(String::new()));
    }

    #[test]
    fn test_error_record() {
        let decoded = Dialect::Native
            .decode_line(r#"{"error":"model not loaded"}"#)
            .unwrap();
        assert_eq!(
            decoded.event,
            StreamEvent::Error("model not loaded".to_string())
        );
    }

    #[test]
    fn test_undecodable_line_is_kept_raw() {
        let decoded = Dialect::Native.decode_line("not json").unwrap();
        assert_eq!(decoded.raw, Some("not json"));
        assert_eq!(decoded.event, StreamEvent::Unparsed);
        assert!(Dialect::Native.decode_line("").is_none());
    }

    // ==================== OpenAI-compatible lines ====================

    #[test]
    fn test_openai_prefix_stripped() {
        let decoded = Dialect::OpenAiCompatible
            .decode_line(r#"data: {"choices":[{"delta":{"content":"lo"}}]}"#)
            .unwrap();
        assert_eq!(decoded.raw, Some(r#"{"choices":[{"delta":{"content":"lo"}}]}"#));
        assert_eq!(decoded.event, StreamEvent::Delta("lo".to_string()));
    }

    #[test]
    fn test_openai_done_sentinel() {
        let decoded = Dialect::OpenAiCompatible.decode_line("data: [DONE]").unwrap();
        assert_eq!(decoded.raw, None);
        assert_eq!(decoded.event, StreamEvent::Done);
    }

    #[test]
    fn test_openai_ignores_done_flag() {
        let decoded = Dialect::OpenAiCompatible
            .decode_line(r#"data: {"choices":[{"delta":{}}],"done":true}"#)
            .unwrap();
        assert_eq!(decoded.event, StreamEvent::Delta(String::new()));
    }
}
