//! Vendor resolution
//!
//! Picks exactly one upstream vendor from the credentials available for a
//! request. An explicitly requested vendor either resolves or fails; auto mode
//! walks the configured preference order and takes the first vendor whose
//! required credentials are all present.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::credentials::{CredentialKey, Credentials};
use super::endpoint::{
    DEFAULT_GATEWAY_ROOT, DEFAULT_GATEWAY_SOURCE, DEFAULT_OPENAI_BASE_URL, HeaderMap,
    build_endpoint, normalize_base_url, vendor_headers,
};
use super::error::ProviderError;

/// Placeholder some templates ship instead of a real key
const PLACEHOLDER_API_KEY: &str = "dummy";

/// Upstream LLM API families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "workers-ai")]
    WorkersAi,
}

impl Vendor {
    /// Gateway path slug, also used as the provider name
    pub fn slug(&self) -> &'static str {
        match self {
            Vendor::OpenAi => "openai",
            Vendor::WorkersAi => "workers-ai",
        }
    }

    /// Model used when the caller does not name one
    pub fn default_model(&self) -> &'static str {
        match self {
            Vendor::OpenAi => models::openai::GPT_4O_MINI,
            Vendor::WorkersAi => models::workers_ai::LLAMA_3_1_8B,
        }
    }

    fn required_keys(&self) -> &'static [CredentialKey] {
        match self {
            Vendor::OpenAi => &[CredentialKey::OpenAiApiKey],
            Vendor::WorkersAi => &[
                CredentialKey::CloudflareAccountId,
                CredentialKey::CloudflareGatewayId,
                CredentialKey::CloudflareApiToken,
            ],
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Vendor {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Vendor::OpenAi),
            "workers-ai" | "workersai" | "cloudflare" => Ok(Vendor::WorkersAi),
            other => Err(ProviderError::configuration(
                "auto",
                format!(
                    "Unsupported provider type: '{}'. Use \"openai\", \"workers-ai\" or \"auto\"",
                    other
                ),
            )),
        }
    }
}

/// Well-known model identifiers
pub mod models {
    pub mod openai {
        pub const GPT_4O_MINI: &str = "gpt-4o-mini";
    }

    pub mod workers_ai {
        pub const LLAMA_3_1_8B: &str = "@cf/meta/llama-3.1-8b-instruct";
    }
}

/// Either a named vendor or auto-detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VendorSelection {
    #[default]
    Auto,
    Explicit(Vendor),
}

impl FromStr for VendorSelection {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(VendorSelection::Auto);
        }
        trimmed.parse().map(VendorSelection::Explicit)
    }
}

impl fmt::Display for VendorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VendorSelection::Auto => f.write_str("auto"),
            VendorSelection::Explicit(vendor) => fmt::Display::fmt(vendor, f),
        }
    }
}

/// Order in which auto mode tries vendors when several are complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorPreference {
    /// Gateway-routed alternate-model vendor first
    #[default]
    GatewayFirst,
    /// Direct OpenAI-compatible vendor first
    DirectFirst,
}

impl VendorPreference {
    pub fn order(&self) -> [Vendor; 2] {
        match self {
            VendorPreference::GatewayFirst => [Vendor::WorkersAi, Vendor::OpenAi],
            VendorPreference::DirectFirst => [Vendor::OpenAi, Vendor::WorkersAi],
        }
    }
}

impl FromStr for VendorPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "gateway_first" | "gateway" => Ok(VendorPreference::GatewayFirst),
            "direct_first" | "direct" | "openai_first" => Ok(VendorPreference::DirectFirst),
            other => Err(format!("Invalid vendor preference: {}", other)),
        }
    }
}

/// Resolved connection settings for one vendor
#[derive(Clone, PartialEq, Eq)]
pub enum VendorConfig {
    OpenAiCompatible {
        api_key: String,
        base_url: String,
        headers: HeaderMap,
    },
    GatewayRouted {
        account_id: String,
        gateway_id: String,
        api_token: String,
        headers: HeaderMap,
        gateway_root: String,
    },
}

impl VendorConfig {
    pub fn vendor(&self) -> Vendor {
        match self {
            VendorConfig::OpenAiCompatible { .. } => Vendor::OpenAi,
            VendorConfig::GatewayRouted { .. } => Vendor::WorkersAi,
        }
    }

    /// Base URL; always derived for gateway-routed configs
    pub fn base_url(&self) -> String {
        match self {
            VendorConfig::OpenAiCompatible { base_url, .. } => base_url.clone(),
            VendorConfig::GatewayRouted {
                account_id,
                gateway_id,
                gateway_root,
                ..
            } => build_endpoint(gateway_root, Vendor::WorkersAi.slug(), account_id, gateway_id),
        }
    }

    pub fn api_key(&self) -> &str {
        match self {
            VendorConfig::OpenAiCompatible { api_key, .. } => api_key,
            VendorConfig::GatewayRouted { api_token, .. } => api_token,
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        match self {
            VendorConfig::OpenAiCompatible { headers, .. }
            | VendorConfig::GatewayRouted { headers, .. } => headers,
        }
    }
}

impl fmt::Debug for VendorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorConfig")
            .field("vendor", &self.vendor())
            .field("base_url", &self.base_url())
            .field("headers", self.headers())
            .finish_non_exhaustive()
    }
}

/// Per-call options layered on top of the credentials
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Explicit base URL for the OpenAI-compatible vendor
    pub base_url: Option<String>,
    /// Extra headers; override defaults of the same name
    pub headers: HeaderMap,
}

/// Resolver settings, normally taken from the gateway configuration
#[derive(Debug, Clone)]
pub struct VendorResolver {
    pub preference: VendorPreference,
    pub gateway_root: String,
    pub openai_base_url: String,
    pub gateway_source: String,
}

impl Default for VendorResolver {
    fn default() -> Self {
        Self {
            preference: VendorPreference::default(),
            gateway_root: DEFAULT_GATEWAY_ROOT.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            gateway_source: DEFAULT_GATEWAY_SOURCE.to_string(),
        }
    }
}

impl VendorResolver {
    pub fn with_preference(mut self, preference: VendorPreference) -> Self {
        self.preference = preference;
        self
    }

    pub fn with_gateway_root(mut self, root: impl Into<String>) -> Self {
        self.gateway_root = root.into();
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = url.into();
        self
    }

    /// Resolve one vendor config or fail with a configuration error
    pub fn resolve(
        &self,
        selection: VendorSelection,
        credentials: &Credentials,
        options: &ResolveOptions,
    ) -> Result<VendorConfig, ProviderError> {
        debug!(
            selection = %selection,
            present = ?credentials.present_keys(),
            "Resolving vendor"
        );

        match selection {
            VendorSelection::Explicit(vendor) => self
                .try_build(vendor, credentials, options)
                .map_err(|missing| missing_error(vendor, &missing)),
            VendorSelection::Auto => {
                for vendor in self.preference.order() {
                    if let Ok(config) = self.try_build(vendor, credentials, options) {
                        debug!(vendor = %vendor, "Auto-selected vendor");
                        return Ok(config);
                    }
                }
                Err(ProviderError::configuration(
                    "auto",
                    "no provider credentials found: set OPENAI_API_KEY, or CLOUDFLARE_ACCOUNT_ID, \
                     CLOUDFLARE_GATEWAY_ID and CLOUDFLARE_API_TOKEN",
                ))
            }
        }
    }

    /// Build a vendor's config if all its required keys are present,
    /// otherwise return the missing keys
    fn try_build(
        &self,
        vendor: Vendor,
        credentials: &Credentials,
        options: &ResolveOptions,
    ) -> Result<VendorConfig, Vec<CredentialKey>> {
        let missing: Vec<CredentialKey> = vendor
            .required_keys()
            .iter()
            .copied()
            .filter(|key| usable(*key, credentials.get(*key)).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let config = match vendor {
            Vendor::OpenAi => {
                let api_key = credentials.openai_api_key.clone().unwrap_or_default();
                let gateway = credentials
                    .cloudflare_account_id
                    .as_deref()
                    .zip(credentials.cloudflare_gateway_id.as_deref());

                let (base_url, source) = match (&options.base_url, gateway) {
                    (Some(explicit), _) => (normalize_base_url(explicit), None),
                    (None, Some((account_id, gateway_id))) => (
                        build_endpoint(&self.gateway_root, vendor.slug(), account_id, gateway_id),
                        Some(self.gateway_source.as_str()),
                    ),
                    (None, None) => (normalize_base_url(&self.openai_base_url), None),
                };

                VendorConfig::OpenAiCompatible {
                    api_key,
                    base_url,
                    headers: vendor_headers(source, &options.headers),
                }
            }
            Vendor::WorkersAi => VendorConfig::GatewayRouted {
                account_id: credentials.cloudflare_account_id.clone().unwrap_or_default(),
                gateway_id: credentials.cloudflare_gateway_id.clone().unwrap_or_default(),
                api_token: credentials.cloudflare_api_token.clone().unwrap_or_default(),
                headers: vendor_headers(Some(&self.gateway_source), &options.headers),
                gateway_root: self.gateway_root.clone(),
            },
        };
        Ok(config)
    }
}

fn usable(key: CredentialKey, value: Option<&str>) -> Option<&str> {
    match key {
        CredentialKey::OpenAiApiKey => value.filter(|v| *v != PLACEHOLDER_API_KEY),
        _ => value,
    }
}

fn missing_error(vendor: Vendor, missing: &[CredentialKey]) -> ProviderError {
    let names: Vec<&str> = missing.iter().map(CredentialKey::env_name).collect();
    ProviderError::configuration(
        vendor.slug(),
        format!("{} requires {}", vendor.slug(), names.join(", ")),
    )
}
