//! Common test utilities for agent-gateway

pub mod fixtures;
pub mod upstream;

pub use fixtures::{CredentialFactory, completion_body};
pub use upstream::MockUpstream;
