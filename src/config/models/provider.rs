//! Provider resolution settings

use crate::core::providers::endpoint::{
    DEFAULT_GATEWAY_ROOT, DEFAULT_GATEWAY_SOURCE, DEFAULT_OPENAI_BASE_URL,
};
use crate::core::providers::{
    ProviderError, RequestContext, VendorPreference, VendorResolver, VendorSelection,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How upstream vendors are chosen and addressed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// `auto`, `openai` or `workers-ai` (aliases `workersai`, `cloudflare`)
    #[serde(default = "default_vendor")]
    pub default_vendor: String,
    /// Order tried in auto mode when several vendors are complete
    #[serde(default)]
    pub preference: VendorPreference,
    #[serde(default = "default_gateway_root")]
    pub gateway_root: String,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    /// Value of the gateway source header
    #[serde(default = "default_gateway_source")]
    pub gateway_source: String,
    /// Credential values consulted before the process environment
    #[serde(default)]
    pub bindings: HashMap<String, String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            default_vendor: default_vendor(),
            preference: VendorPreference::default(),
            gateway_root: default_gateway_root(),
            openai_base_url: default_openai_base_url(),
            gateway_source: default_gateway_source(),
            bindings: HashMap::new(),
        }
    }
}

impl ProvidersConfig {
    pub fn default_selection(&self) -> Result<VendorSelection, ProviderError> {
        self.default_vendor.parse()
    }

    pub fn resolver(&self) -> VendorResolver {
        let mut resolver = VendorResolver::default()
            .with_preference(self.preference)
            .with_gateway_root(self.gateway_root.clone())
            .with_openai_base_url(self.openai_base_url.clone());
        resolver.gateway_source = self.gateway_source.clone();
        resolver
    }

    pub fn bindings(&self) -> RequestContext {
        RequestContext::new(self.bindings.clone())
    }

    pub fn validate(&self) -> Result<(), String> {
        self.default_selection().map_err(|e| e.message().to_string())?;

        for (name, url) in [
            ("gateway_root", &self.gateway_root),
            ("openai_base_url", &self.openai_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }
        Ok(())
    }
}

fn default_vendor() -> String {
    "auto".to_string()
}

fn default_gateway_root() -> String {
    DEFAULT_GATEWAY_ROOT.to_string()
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_gateway_source() -> String {
    DEFAULT_GATEWAY_SOURCE.to_string()
}
