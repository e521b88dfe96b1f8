//! Agent registry and upstream call settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::agent::registry::{DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_AGENTS};

/// Registry bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRegistryConfig {
    #[serde(default = "default_max_agents")]
    pub max_capacity: u64,
    /// Seconds an unused agent is kept; `null` keeps it until evicted by capacity
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: Option<u64>,
}

impl Default for AgentRegistryConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_agents(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

impl AgentRegistryConfig {
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_capacity == 0 {
            return Err("Agent registry capacity cannot be 0".to_string());
        }
        if self.idle_timeout_secs == Some(0) {
            return Err("Agent idle timeout cannot be 0".to_string());
        }
        Ok(())
    }
}

/// Upstream completion calls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Per-request timeout in seconds; unset leaves calls unbounded
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_max_agents() -> u64 {
    DEFAULT_MAX_AGENTS
}

fn default_idle_timeout_secs() -> Option<u64> {
    Some(DEFAULT_IDLE_TIMEOUT.as_secs())
}
