//! Agent wrapper: a provider handle, a model and instructions

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use super::client::{CompletionBackend, CompletionRequest};
use super::extract::{Extracted, concat_stream_events, extract_text, normalize_completion};
use crate::core::providers::{ProviderError, ProviderHandle, ProviderInfo};

/// What an agent is made of
#[derive(Debug, Clone)]
pub struct AgentSpec {
    pub name: String,
    pub instructions: String,
    pub handle: ProviderHandle,
    pub model_id: String,
}

/// Text produced by one generate call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub text: String,
    /// False when the upstream shape was not recognised and `text` is the
    /// JSON serialisation of the whole response
    pub recognized: bool,
}

impl From<Extracted> for Generation {
    fn from(extracted: Extracted) -> Self {
        let recognized = extracted.is_recognized();
        Self {
            text: extracted.into_text(),
            recognized,
        }
    }
}

pub struct Agent {
    spec: AgentSpec,
    backend: Arc<dyn CompletionBackend>,
    stream: bool,
}

impl Agent {
    pub fn new(spec: AgentSpec, backend: Arc<dyn CompletionBackend>) -> Self {
        debug!(name = %spec.name, model = %spec.model_id, provider = spec.handle.name(), "Agent created");
        Self {
            spec,
            backend,
            stream: false,
        }
    }

    /// Reassemble a streamed response instead of reading one body
    pub fn streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn instructions(&self) -> &str {
        &self.spec.instructions
    }

    pub fn model_id(&self) -> &str {
        &self.spec.model_id
    }

    pub fn provider(&self) -> ProviderInfo {
        self.spec.handle.info()
    }

    /// Issue exactly one completion request for `prompt`
    pub async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        let descriptor = self.spec.handle.descriptor(Some(&self.spec.model_id));
        let request = CompletionRequest {
            descriptor: &descriptor,
            instructions: &self.spec.instructions,
            prompt,
        };

        let generation: Generation = if self.stream {
            let events = self.backend.complete_stream(&request).await?;
            concat_stream_events(&events).into()
        } else {
            let raw = self.backend.complete(&request).await?;
            extract_text(&normalize_completion(raw)).into()
        };

        if !generation.recognized {
            warn!(
                agent = %self.spec.name,
                provider = descriptor.name,
                "Unrecognized response shape; returning serialized response"
            );
        }
        Ok(generation)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("spec", &self.spec)
            .field("stream", &self.stream)
            .finish_non_exhaustive()
    }
}
