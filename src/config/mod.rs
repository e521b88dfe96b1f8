//! Configuration management for the gateway
//!
//! Configuration is read from a YAML file, then selected environment
//! variables override individual settings, then the result is validated.

pub mod models;

pub use models::*;

use crate::core::providers::{EnvSource, ProcessEnv, VendorPreference};
use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

pub const ENV_HOST: &str = "GATEWAY_HOST";
pub const ENV_PORT: &str = "GATEWAY_PORT";
pub const ENV_VENDOR_PREFERENCE: &str = "LLM_VENDOR_PREFERENCE";
pub const ENV_DEFAULT_VENDOR: &str = "LLM_DEFAULT_VENDOR";
pub const ENV_GATEWAY_ROOT: &str = "CLOUDFLARE_GATEWAY_ROOT";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let gateway: GatewayConfig = serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, fall back to defaults otherwise, then apply
    /// process environment overrides
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Self::from_file(path).await?
        } else {
            warn!("Configuration file {:?} not found, using defaults", path);
            Self::default()
        };
        config.with_env_overrides(&ProcessEnv)
    }

    /// Apply environment overrides and re-validate
    pub fn with_env_overrides(mut self, env: &dyn EnvSource) -> Result<Self> {
        let var = |name: &str| env.var(name).filter(|v| !v.trim().is_empty());

        if let Some(host) = var(ENV_HOST) {
            self.gateway.server.host = host;
        }
        if let Some(port) = var(ENV_PORT) {
            self.gateway.server.port = port.trim().parse().map_err(|_| {
                GatewayError::Config(format!("{} must be a port number, got '{}'", ENV_PORT, port))
            })?;
        }
        if let Some(preference) = var(ENV_VENDOR_PREFERENCE) {
            self.gateway.providers.preference = preference
                .parse::<VendorPreference>()
                .map_err(|e| GatewayError::Config(format!("{}: {}", ENV_VENDOR_PREFERENCE, e)))?;
        }
        if let Some(vendor) = var(ENV_DEFAULT_VENDOR) {
            self.gateway.providers.default_vendor = vendor;
        }
        if let Some(root) = var(ENV_GATEWAY_ROOT) {
            self.gateway.providers.gateway_root = root;
        }
        if let Some(url) = var(ENV_OPENAI_BASE_URL) {
            self.gateway.providers.openai_base_url = url;
        }

        self.validate()?;
        Ok(self)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    pub fn providers(&self) -> &ProvidersConfig {
        &self.gateway.providers
    }

    pub fn agents(&self) -> &AgentRegistryConfig {
        &self.gateway.agents
    }

    pub fn upstream(&self) -> &UpstreamConfig {
        &self.gateway.upstream
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .server
            .cors
            .validate()
            .map_err(|e| GatewayError::Config(format!("CORS config error: {}", e)))?;

        self.gateway
            .providers
            .validate()
            .map_err(|e| GatewayError::Config(format!("Providers config error: {}", e)))?;

        self.gateway
            .agents
            .validate()
            .map_err(|e| GatewayError::Config(format!("Agents config error: {}", e)))?;

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
