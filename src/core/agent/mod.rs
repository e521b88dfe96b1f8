//! Agents: a provider handle, a model and instructions behind one
//! `generate` call
//!
//! [`AgentFactory`] builds agents per request; [`AgentRegistry`] keeps named
//! agents between requests.

pub mod agent;
pub mod client;
pub mod extract;
pub mod factory;
pub mod presets;
pub mod registry;
pub mod sse;

pub use agent::{Agent, AgentSpec, Generation};
pub use client::{CompletionBackend, CompletionRequest, HttpCompletionClient};
pub use extract::{Extracted, extract_text};
pub use factory::{AgentFactory, AgentRequest};
pub use presets::Persona;
pub use registry::AgentRegistry;
