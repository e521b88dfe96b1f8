//! Credential lookup
//!
//! Values are looked up in a fixed priority order: an explicit override
//! supplied by the caller, then the request-scoped context bindings, then the
//! process environment. Absence is never an error at this level.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Named credential keys understood by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    OpenAiApiKey,
    CloudflareAccountId,
    CloudflareGatewayId,
    CloudflareApiToken,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 4] = [
        CredentialKey::OpenAiApiKey,
        CredentialKey::CloudflareAccountId,
        CredentialKey::CloudflareGatewayId,
        CredentialKey::CloudflareApiToken,
    ];

    /// Environment variable / binding name for this key
    pub fn env_name(&self) -> &'static str {
        match self {
            CredentialKey::OpenAiApiKey => "OPENAI_API_KEY",
            CredentialKey::CloudflareAccountId => "CLOUDFLARE_ACCOUNT_ID",
            CredentialKey::CloudflareGatewayId => "CLOUDFLARE_GATEWAY_ID",
            CredentialKey::CloudflareApiToken => "CLOUDFLARE_API_TOKEN",
        }
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_name())
    }
}

/// Read access to a process-wide variable store
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed map standing in for the environment
#[derive(Debug, Clone, Default)]
pub struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

/// Request-scoped context: the environment sub-object of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub env: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(env: HashMap<String, String>) -> Self {
        Self { env }
    }
}

/// Explicit per-call credential overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialOverrides {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub gateway_id: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
}

impl CredentialOverrides {
    pub fn get(&self, key: CredentialKey) -> Option<&str> {
        match key {
            CredentialKey::OpenAiApiKey => self.api_key.as_deref(),
            CredentialKey::CloudflareAccountId => self.account_id.as_deref(),
            CredentialKey::CloudflareGatewayId => self.gateway_id.as_deref(),
            CredentialKey::CloudflareApiToken => self.api_token.as_deref(),
        }
    }
}

/// Looks up credential values across the three origins
#[derive(Clone)]
pub struct CredentialSource {
    env: Arc<dyn EnvSource>,
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSource").finish_non_exhaustive()
    }
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::new(Arc::new(ProcessEnv))
    }
}

impl CredentialSource {
    pub fn new(env: Arc<dyn EnvSource>) -> Self {
        Self { env }
    }

    /// First present value wins; empty strings count as absent
    pub fn lookup(
        &self,
        key: CredentialKey,
        explicit: Option<&str>,
        context: Option<&RequestContext>,
    ) -> Option<String> {
        if let Some(value) = present(explicit) {
            return Some(value.to_string());
        }
        if let Some(value) = context.and_then(|ctx| present(ctx.env.get(key.env_name()).map(String::as_str))) {
            return Some(value.to_string());
        }
        self.env.var(key.env_name()).filter(|v| !v.trim().is_empty())
    }

    /// Snapshot every known key for one request
    pub fn gather(
        &self,
        overrides: &CredentialOverrides,
        context: Option<&RequestContext>,
    ) -> Credentials {
        let get = |key| self.lookup(key, overrides.get(key), context);
        Credentials {
            openai_api_key: get(CredentialKey::OpenAiApiKey),
            cloudflare_account_id: get(CredentialKey::CloudflareAccountId),
            cloudflare_gateway_id: get(CredentialKey::CloudflareGatewayId),
            cloudflare_api_token: get(CredentialKey::CloudflareApiToken),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Credential values resolved for a single request
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub cloudflare_account_id: Option<String>,
    pub cloudflare_gateway_id: Option<String>,
    pub cloudflare_api_token: Option<String>,
}

impl Credentials {
    pub fn get(&self, key: CredentialKey) -> Option<&str> {
        match key {
            CredentialKey::OpenAiApiKey => self.openai_api_key.as_deref(),
            CredentialKey::CloudflareAccountId => self.cloudflare_account_id.as_deref(),
            CredentialKey::CloudflareGatewayId => self.cloudflare_gateway_id.as_deref(),
            CredentialKey::CloudflareApiToken => self.cloudflare_api_token.as_deref(),
        }
    }

    /// Names of the keys that have a value, never the values themselves
    pub fn present_keys(&self) -> Vec<&'static str> {
        CredentialKey::ALL
            .iter()
            .filter(|key| self.get(**key).is_some())
            .map(CredentialKey::env_name)
            .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("present", &self.present_keys())
            .finish()
    }
}
