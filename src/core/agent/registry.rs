//! Id-keyed agent registry
//!
//! Bounded by entry count and evicts entries that sit idle for longer than the
//! configured period. Writing an existing id replaces the previous agent.

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::agent::Agent;

pub const DEFAULT_MAX_AGENTS: u64 = 1_000;
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Clone)]
pub struct AgentRegistry {
    agents: Cache<String, Arc<Agent>>,
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGENTS, Some(DEFAULT_IDLE_TIMEOUT))
    }
}

impl AgentRegistry {
    pub fn new(max_capacity: u64, time_to_idle: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(max_capacity);
        if let Some(idle) = time_to_idle {
            builder = builder.time_to_idle(idle);
        }
        Self {
            agents: builder.build(),
        }
    }

    /// Store `agent` under `id`, generating one when absent or blank
    pub async fn create(&self, id: Option<String>, agent: Agent) -> String {
        let id = id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        info!(id = %id, name = agent.name(), "Registering agent");
        self.agents.insert(id.clone(), Arc::new(agent)).await;
        id
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Agent>> {
        self.agents.get(id).await
    }

    /// Approximate number of live entries
    pub fn len(&self) -> u64 {
        self.agents.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending evictions now instead of lazily
    pub async fn run_pending_tasks(&self) {
        self.agents.run_pending_tasks().await;
    }
}
