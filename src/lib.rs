//! # Agent Gateway
//!
//! A thin HTTP façade over hosted LLM endpoints. Each request resolves one
//! upstream vendor from the credentials available to it (call-time overrides,
//! configured bindings, or the process environment), builds the endpoint and
//! header set for that vendor, and forwards a prompt through a small agent
//! wrapper.
//!
//! Two vendor families are supported:
//!
//! - **OpenAI-compatible**: `OPENAI_API_KEY`, optionally routed through the
//!   AI gateway when account and gateway ids are also present
//! - **Workers AI via the AI gateway**: `CLOUDFLARE_ACCOUNT_ID`,
//!   `CLOUDFLARE_GATEWAY_ID` and `CLOUDFLARE_API_TOKEN`
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use agent_gateway::{Config, server::builder::serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     serve(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Resolving a provider directly
//!
//! ```rust
//! use agent_gateway::core::providers::{
//!     Credentials, ProviderHandle, ResolveOptions, VendorResolver, VendorSelection,
//! };
//!
//! let credentials = Credentials {
//!     cloudflare_account_id: Some("acct".into()),
//!     cloudflare_gateway_id: Some("gw".into()),
//!     cloudflare_api_token: Some("token".into()),
//!     ..Default::default()
//! };
//! let config = VendorResolver::default()
//!     .resolve(VendorSelection::Auto, &credentials, &ResolveOptions::default())
//!     .unwrap();
//! let descriptor = ProviderHandle::from_config(&config).descriptor(Some("@cf/meta/llama-3.1-8b-instruct"));
//! assert_eq!(
//!     descriptor.base_url,
//!     "https://gateway.ai.cloudflare.com/v1/acct/gw/workers-ai/v1"
//! );
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::agent::{Agent, AgentFactory, AgentRegistry, AgentRequest, Generation};
pub use core::providers::{
    CredentialSource, Credentials, ProviderError, ProviderHandle, Vendor, VendorConfig,
    VendorResolver, VendorSelection,
};
pub use utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
