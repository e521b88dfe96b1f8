//! Provider-layer error types
//!
//! Two failure families exist below the route layer: credentials that cannot
//! satisfy any vendor, and upstream completion calls that fail.

use thiserror::Error;

/// Errors raised while resolving a provider or talking to it
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Missing or invalid credentials; never retried
    #[error("Configuration error for {provider}: {message}")]
    Configuration {
        provider: &'static str,
        message: String,
    },

    /// The upstream completion call failed; message is passed through verbatim
    #[error("Generation failed for {provider}: {message}")]
    Generation {
        provider: &'static str,
        message: String,
        status: Option<u16>,
    },
}

impl ProviderError {
    /// Create configuration error
    pub fn configuration(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            provider,
            message: message.into(),
        }
    }

    /// Create generation error
    pub fn generation(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Generation {
            provider,
            message: message.into(),
            status: None,
        }
    }

    /// Create generation error carrying the upstream HTTP status
    pub fn upstream_status(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Generation {
            provider,
            message: message.into(),
            status: Some(status),
        }
    }

    /// Vendor slug the error belongs to
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Configuration { provider, .. } | Self::Generation { provider, .. } => provider,
        }
    }

    /// Bare message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Configuration { message, .. } | Self::Generation { message, .. } => message,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Nothing at this layer is retried automatically
    pub fn is_retryable(&self) -> bool {
        false
    }
}
