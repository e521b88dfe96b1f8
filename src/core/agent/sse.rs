//! Server-Sent Events parsing for streamed completions
//!
//! Bytes arrive in arbitrary chunks; complete lines are decoded and consumed
//! and the trailing partial line is buffered as raw bytes, so a character
//! split across chunks is decoded whole. `data:` fields of one event are joined
//! with newlines and dispatched on the blank line that ends the event.

use serde_json::Value;
use tracing::debug;

/// Incremental SSE parser producing one JSON value per event
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
    data: Option<String>,
    done: bool,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the `[DONE]` marker has been seen
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn process_bytes(&mut self, bytes: &[u8]) -> Vec<Value> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..pos]);
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Flush whatever is left when the byte stream ends
    pub fn finish(&mut self) -> Vec<Value> {
        let rest = std::mem::take(&mut self.buffer);
        let rest = String::from_utf8_lossy(&rest);
        let mut events = Vec::new();
        for line in rest.lines() {
            if let Some(event) = self.process_line(line) {
                events.push(event);
            }
        }
        if let Some(event) = self.dispatch() {
            events.push(event);
        }
        events
    }

    fn process_line(&mut self, line: &str) -> Option<Value> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.find(':') {
            Some(pos) => (&line[..pos], line[pos + 1..].trim_start()),
            None => (line, ""),
        };
        if field == "data" {
            match self.data.as_mut() {
                Some(data) => {
                    data.push('\n');
                    data.push_str(value);
                }
                None => self.data = Some(value.to_string()),
            }
        }
        None
    }

    fn dispatch(&mut self) -> Option<Value> {
        let data = self.data.take()?;
        if self.done {
            return None;
        }
        if data.trim() == "[DONE]" {
            self.done = true;
            return None;
        }
        match serde_json::from_str(&data) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Skipping non-JSON stream event: {}", e);
                None
            }
        }
    }
}
