//! Configuration data models

#![allow(missing_docs)]

pub mod agent;
pub mod gateway;
pub mod logging;
pub mod provider;
pub mod server;

pub use agent::*;
pub use gateway::*;
pub use logging::*;
pub use provider::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8787
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024
}
