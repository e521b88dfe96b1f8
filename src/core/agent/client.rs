//! Completion transport
//!
//! Issues one chat-completion request against an OpenAI-compatible endpoint
//! described by a [`ClientDescriptor`]. No retries, no caching.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

use super::extract::normalize_chunk;
use super::sse::SseParser;
use crate::core::providers::{ClientDescriptor, ProviderError};

/// One completion call: system instructions plus a user prompt
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub descriptor: &'a ClientDescriptor,
    pub instructions: &'a str,
    pub prompt: &'a str,
}

impl CompletionRequest<'_> {
    /// Request body in the chat-completions wire format
    pub fn body(&self, stream: bool) -> Result<Value, ProviderError> {
        let model = self.descriptor.model.as_deref().ok_or_else(|| {
            ProviderError::configuration(self.descriptor.name, "a model id is required before issuing a request")
        })?;

        let mut messages = Vec::with_capacity(2);
        if !self.instructions.is_empty() {
            messages.push(json!({ "role": "system", "content": self.instructions }));
        }
        messages.push(json!({ "role": "user", "content": self.prompt }));

        Ok(json!({
            "model": model,
            "messages": messages,
            "stream": stream,
        }))
    }
}

/// Seam between agents and the network
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Returns the raw upstream response body
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<Value, ProviderError>;

    /// Returns every streamed event, chat chunks lifted to `{"delta": ...}`
    async fn complete_stream(&self, request: &CompletionRequest<'_>)
    -> Result<Vec<Value>, ProviderError>;
}

/// reqwest-backed completion client; cheap to clone, shares one pool
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    http: reqwest::Client,
}

impl HttpCompletionClient {
    /// `timeout` of `None` leaves requests unbounded
    pub fn new(timeout: Option<Duration>) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            ProviderError::configuration("http", format!("Failed to create HTTP client: {}", e))
        })?;
        Ok(Self { http })
    }

    async fn send(
        &self,
        request: &CompletionRequest<'_>,
        stream: bool,
    ) -> Result<reqwest::Response, ProviderError> {
        let descriptor = request.descriptor;
        let url = descriptor.chat_completions_url();
        let body = request.body(stream)?;

        debug!(
            provider = descriptor.name,
            url = %url,
            model = ?descriptor.model,
            stream,
            "Sending completion request"
        );

        let mut builder = self.http.post(&url).bearer_auth(&descriptor.api_key);
        for (name, value) in &descriptor.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::generation(descriptor.name, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = upstream_error_message(&text)
            .unwrap_or_else(|| format!("Upstream returned HTTP {}", status.as_u16()));
        warn!(
            provider = descriptor.name,
            status = status.as_u16(),
            "Upstream completion failed: {}",
            message
        );
        Err(ProviderError::upstream_status(descriptor.name, status.as_u16(), message))
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<Value, ProviderError> {
        let provider = request.descriptor.name;
        let response = self.send(request, false).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::generation(provider, e.to_string()))?;

        // a non-JSON success body is still a result; extraction treats it as a raw string
        Ok(serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())))
    }

    async fn complete_stream(
        &self,
        request: &CompletionRequest<'_>,
    ) -> Result<Vec<Value>, ProviderError> {
        let provider = request.descriptor.name;
        let response = self.send(request, true).await?;

        let mut parser = SseParser::new();
        let mut events = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ProviderError::generation(provider, e.to_string()))?;
            events.extend(parser.process_bytes(&chunk).into_iter().map(normalize_chunk));
            if parser.is_done() {
                break;
            }
        }
        events.extend(parser.finish().into_iter().map(normalize_chunk));

        debug!(provider, events = events.len(), "Stream finished");
        Ok(events)
    }
}

/// Pull a human-readable message out of an upstream error body
fn upstream_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };
    [
        "/error/message",
        "/errors/0/message",
        "/error",
        "/message",
    ]
    .into_iter()
    .find_map(|path| value.pointer(path).and_then(Value::as_str))
    .map(str::to_string)
    .or_else(|| Some(trimmed.to_string()))
}
