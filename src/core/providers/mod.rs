//! Provider selection and configuration resolution
//!
//! Credential lookup feeds the vendor resolver, which produces a
//! [`VendorConfig`]; a [`ProviderHandle`] turns that into per-model
//! [`ClientDescriptor`]s for the completion client.

pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod handle;
pub mod resolver;

pub use credentials::{
    CredentialKey, CredentialOverrides, CredentialSource, Credentials, EnvSource, MapEnv,
    ProcessEnv, RequestContext,
};
pub use endpoint::{HeaderMap, build_endpoint};
pub use error::ProviderError;
pub use handle::{ClientDescriptor, ProviderHandle, ProviderInfo};
pub use resolver::{
    ResolveOptions, Vendor, VendorConfig, VendorPreference, VendorResolver, VendorSelection,
    models,
};
