//! Provider handles and client descriptors

use serde::Serialize;
use std::fmt;

use super::endpoint::HeaderMap;
use super::resolver::{Vendor, VendorConfig};

/// Everything an HTTP client needs to issue one completion request
#[derive(Clone, PartialEq, Eq)]
pub struct ClientDescriptor {
    pub name: &'static str,
    pub base_url: String,
    pub api_key: String,
    pub headers: HeaderMap,
    /// May be unset until an agent attaches a model
    pub model: Option<String>,
}

impl ClientDescriptor {
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl fmt::Debug for ClientDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientDescriptor")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("headers", &self.headers)
            .field("model", &self.model)
            .finish()
    }
}

/// Public, secret-free summary of a handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    #[serde(rename = "type")]
    pub provider_type: Vendor,
    pub name: String,
    pub ready: bool,
}

/// Resolved, callable configuration for one vendor.
///
/// Stateless: every call to [`ProviderHandle::descriptor`] builds a fresh
/// descriptor and leaves the handle untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderHandle {
    vendor: Vendor,
    base_url: String,
    api_key: String,
    headers: HeaderMap,
    default_model: Option<String>,
}

impl ProviderHandle {
    pub fn from_config(config: &VendorConfig) -> Self {
        Self {
            vendor: config.vendor(),
            base_url: config.base_url(),
            api_key: config.api_key().to_string(),
            headers: config.headers().clone(),
            default_model: None,
        }
    }

    /// Descriptors fall back to this model when called without one
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn descriptor(&self, model: Option<&str>) -> ClientDescriptor {
        ClientDescriptor {
            name: self.vendor.slug(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            headers: self.headers.clone(),
            model: model
                .map(str::to_string)
                .or_else(|| self.default_model.clone()),
        }
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn name(&self) -> &'static str {
        self.vendor.slug()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn info(&self) -> ProviderInfo {
        ProviderInfo {
            provider_type: self.vendor,
            name: self.name().to_string(),
            ready: true,
        }
    }
}

impl From<&VendorConfig> for ProviderHandle {
    fn from(config: &VendorConfig) -> Self {
        Self::from_config(config)
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("vendor", &self.vendor)
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .finish_non_exhaustive()
    }
}
