//! Byte stream to text line splitting.
//!
//! Network chunks do not respect line or UTF-8 boundaries, so bytes are
//! buffered until a `\n` arrives and only complete lines are decoded.
//! Invalid UTF-8 is replaced rather than rejected.

use tracing::warn;

/// Accumulates chunks and yields complete lines
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every line it completed, without terminators.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            lines.push(decode(&line[..pos]));
        }
        lines
    }

    /// Whatever is left once the stream closed without a final newline.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        Some(decode(&rest))
    }
}

fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    match String::from_utf8_lossy(bytes) {
        std::borrow::Cow::Borrowed(text) => text.to_string(),
        std::borrow::Cow::Owned(text) => {
            warn!("Replaced invalid UTF-8 in a {}-byte response line", bytes.len());
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_split_across_chunks() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"{\"a\":").is_empty());
        assert_eq!(splitter.push(b"1}\n{\"b\""), vec!["{\"a\":1}"]);
        assert_eq!(splitter.push(b":2}\r\n\n"), vec!["{\"b\":2}", ""]);
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn test_multibyte_char_split_between_chunks() {
        let bytes = "結論\n".as_bytes();
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(&bytes[..2]).is_empty());
        assert_eq!(splitter.push(&bytes[2..]), vec!["結論"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut splitter = LineSplitter::new();
        let lines = splitter.push(b"ok\xff\n");
        assert_eq!(lines, vec!["ok\u{FFFD}"]);
    }

    #[test]
    fn test_finish_returns_unterminated_tail() {
        let mut splitter = LineSplitter::new();
        splitter.push(b"data: [DONE]");
        assert_eq!(splitter.finish(), Some("data: [DONE]".to_string()));
        assert_eq!(splitter.finish(), None);
    }
}
