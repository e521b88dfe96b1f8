//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::agent::{AgentFactory, AgentRegistry, CompletionBackend, HttpCompletionClient};
use crate::core::providers::CredentialSource;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Cloned into every worker; all fields share their underlying data.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Builds one agent per request
    pub factory: Arc<AgentFactory>,
    /// Agents created through `POST /agent`
    pub registry: AgentRegistry,
}

impl AppState {
    /// State reading credentials from the process environment and calling
    /// upstreams over HTTP
    pub fn new(config: Config) -> Result<Self> {
        let backend = HttpCompletionClient::new(config.upstream().timeout())?;
        Self::with_parts(config, CredentialSource::default(), Arc::new(backend))
    }

    pub fn with_parts(
        config: Config,
        credentials: CredentialSource,
        backend: Arc<dyn CompletionBackend>,
    ) -> Result<Self> {
        let providers = config.providers();
        let factory = AgentFactory::new(credentials, providers.resolver(), backend)
            .with_bindings(providers.bindings())
            .with_default_selection(providers.default_selection()?);

        let agents = config.agents();
        let registry = AgentRegistry::new(agents.max_capacity, agents.idle_timeout());

        Ok(Self {
            config: Arc::new(config),
            factory: Arc::new(factory),
            registry,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
