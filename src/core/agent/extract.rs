//! Text extraction from generation results and streamed events

use serde_json::{Value, json};

/// Outcome of pulling text out of a generation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// A recognised text field was found
    Text(String),
    /// No recognised field; holds the JSON serialisation of the whole value
    /// (empty for a stream)
    Unrecognized(String),
}

impl Extracted {
    pub fn text(&self) -> &str {
        match self {
            Extracted::Text(text) | Extracted::Unrecognized(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Extracted::Text(text) | Extracted::Unrecognized(text) => text,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Extracted::Text(_))
    }
}

/// Raw string, then `text`, `outputText`, `output`; otherwise the value
/// serialised as JSON and flagged unrecognized.
pub fn extract_text(raw: &Value) -> Extracted {
    if let Value::String(text) = raw {
        return Extracted::Text(text.clone());
    }
    for field in ["text", "outputText", "output"] {
        if let Some(text) = raw.get(field).and_then(Value::as_str) {
            return Extracted::Text(text.to_string());
        }
    }
    Extracted::Unrecognized(raw.to_string())
}

/// Lift a chat-completion body to `{"text": ...}` when it carries message
/// content; anything else passes through untouched.
pub fn normalize_completion(raw: Value) -> Value {
    match raw
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        Some(content) => json!({ "text": content }),
        None => raw,
    }
}

/// Lift a chat-completion chunk to `{"delta": ...}` when it carries delta
/// content; anything else passes through untouched.
pub fn normalize_chunk(raw: Value) -> Value {
    match raw
        .pointer("/choices/0/delta/content")
        .and_then(Value::as_str)
    {
        Some(content) => json!({ "delta": content }),
        None => raw,
    }
}

/// Text contributed by one streamed event: `delta`, else `text`, else `content`
pub fn stream_event_text(event: &Value) -> Option<&str> {
    ["delta", "text", "content"]
        .into_iter()
        .find_map(|field| event.get(field).and_then(Value::as_str))
}

/// Concatenate the text of every recognised event, skipping the rest.
/// Unrecognized (and empty) when no event carried text.
pub fn concat_stream_events<'a>(events: impl IntoIterator<Item = &'a Value>) -> Extracted {
    let mut matched = false;
    let text: String = events
        .into_iter()
        .filter_map(stream_event_text)
        .inspect(|_| matched = true)
        .collect();
    if matched {
        Extracted::Text(text)
    } else {
        Extracted::Unrecognized(text)
    }
}
