//! Per-request agent construction
//!
//! Gathers credentials, resolves a vendor and wraps the resulting handle in
//! an [`Agent`]. Nothing here is cached: every call re-reads credentials.

use std::sync::Arc;
use tracing::debug;

use super::agent::{Agent, AgentSpec};
use super::client::CompletionBackend;
use super::presets::{DEFAULT_AGENT_NAME, DEFAULT_INSTRUCTIONS, Persona};
use crate::core::providers::{
    CredentialOverrides, CredentialSource, ProviderError, ProviderHandle, ProviderInfo,
    RequestContext, ResolveOptions, VendorConfig, VendorResolver, VendorSelection,
};

/// Everything a caller may pin when asking for an agent
#[derive(Debug, Clone, Default)]
pub struct AgentRequest {
    /// `None` uses the factory's default selection
    pub selection: Option<VendorSelection>,
    pub model: Option<String>,
    pub name: Option<String>,
    pub instructions: Option<String>,
    pub overrides: CredentialOverrides,
    pub options: ResolveOptions,
    pub stream: bool,
}

impl AgentRequest {
    pub fn persona(persona: &Persona) -> Self {
        Self {
            name: Some(persona.name.to_string()),
            instructions: Some(persona.instructions.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct AgentFactory {
    credentials: CredentialSource,
    resolver: VendorResolver,
    backend: Arc<dyn CompletionBackend>,
    bindings: Option<RequestContext>,
    default_selection: VendorSelection,
}

impl AgentFactory {
    pub fn new(
        credentials: CredentialSource,
        resolver: VendorResolver,
        backend: Arc<dyn CompletionBackend>,
    ) -> Self {
        Self {
            credentials,
            resolver,
            backend,
            bindings: None,
            default_selection: VendorSelection::Auto,
        }
    }

    /// Context bindings consulted between overrides and the environment
    pub fn with_bindings(mut self, bindings: RequestContext) -> Self {
        self.bindings = if bindings.env.is_empty() {
            None
        } else {
            Some(bindings)
        };
        self
    }

    pub fn with_default_selection(mut self, selection: VendorSelection) -> Self {
        self.default_selection = selection;
        self
    }

    pub fn default_selection(&self) -> VendorSelection {
        self.default_selection
    }

    fn resolve(&self, request: &AgentRequest) -> Result<VendorConfig, ProviderError> {
        let selection = request.selection.unwrap_or(self.default_selection);
        let credentials = self
            .credentials
            .gather(&request.overrides, self.bindings.as_ref());
        self.resolver
            .resolve(selection, &credentials, &request.options)
    }

    pub fn build(&self, request: AgentRequest) -> Result<Agent, ProviderError> {
        let config = self.resolve(&request)?;
        let vendor = config.vendor();
        let handle = ProviderHandle::from_config(&config).with_default_model(vendor.default_model());

        let model_id = non_blank(request.model).unwrap_or_else(|| vendor.default_model().to_string());
        let spec = AgentSpec {
            name: non_blank(request.name).unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string()),
            instructions: request
                .instructions
                .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
            handle,
            model_id,
        };
        debug!(
            name = %spec.name,
            vendor = %vendor,
            model = %spec.model_id,
            base_url = spec.handle.base_url(),
            "Built agent"
        );

        Ok(Agent::new(spec, self.backend.clone()).streaming(request.stream))
    }

    /// Resolve the default selection without building an agent
    pub fn check(&self) -> Result<ProviderInfo, ProviderError> {
        let config = self.resolve(&AgentRequest::default())?;
        Ok(ProviderHandle::from_config(&config).info())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
