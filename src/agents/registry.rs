//! Agent registry over the key-value store.
//!
//! Owns the `agent:<name>` key namespace and the record shape. Error policy
//! is asymmetric on purpose: reads fail soft (absence), writes fail loud.

use crate::agents::Agent;
use crate::kv::KvStore;
use crate::types::{AppError, Result};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

/// Key prefix owned by the registry.
const AGENT_KEY_PREFIX: &str = "agent:";

#[derive(Clone)]
pub struct AgentRegistry {
    store: Arc<dyn KvStore>,
}

impl AgentRegistry {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Build the storage key for a name. Names are lowercased first, so
    /// lookups and writes agree on the key regardless of caller casing.
    fn key(name: &str) -> String {
        format!("{}{}", AGENT_KEY_PREFIX, name.to_lowercase())
    }

    /// Look up a single agent by name.
    ///
    /// Storage failures are logged and mapped to `None`; callers cannot
    /// distinguish a failed lookup from true absence.
    pub async fn get(&self, name: &str) -> Option<Agent> {
        match self.store.get(&Self::key(name)).await {
            Ok(Some(value)) => decode_agent(value),
            Ok(None) => None,
            Err(e) => {
                tracing::error!(name = %name, error = %e, "error getting agent");
                None
            }
        }
    }

    /// List every registered agent, in whatever order the backend yields.
    ///
    /// Missing and undecodable entries are filtered out; any failure
    /// degrades to an empty list, never an error.
    pub async fn list(&self) -> Vec<Agent> {
        let pattern = format!("{}*", AGENT_KEY_PREFIX);
        let keys = match self.store.keys(&pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::error!(error = %e, "error listing agent keys");
                return Vec::new();
            }
        };
        if keys.is_empty() {
            return Vec::new();
        }

        match self.store.mget(&keys).await {
            Ok(values) => values
                .into_iter()
                .flatten()
                .filter_map(decode_agent)
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "error fetching agents");
                Vec::new()
            }
        }
    }

    /// Create or replace an agent. Pure upsert: a fresh record (including a
    /// fresh `created_at`) unconditionally overwrites whatever was stored,
    /// with no read-before-write or concurrency check. Storage failures
    /// propagate to the caller.
    pub async fn upsert(&self, name: &str, assistant_id: &str) -> Result<Agent> {
        let agent = Agent {
            name: name.to_lowercase(),
            assistant_id: assistant_id.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        let value = serde_json::to_value(&agent)
            .map_err(|e| AppError::Storage(format!("Failed to encode agent: {}", e)))?;
        self.store.set(&Self::key(name), value).await?;
        Ok(agent)
    }

    /// Delete an agent's record.
    ///
    /// Returns `true` when the delete call completed and `false` when it
    /// failed. Deleting a missing key still reports `true`; this is not an
    /// existence signal.
    pub async fn delete(&self, name: &str) -> bool {
        match self.store.del(&Self::key(name)).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(name = %name, error = %e, "error deleting agent");
                false
            }
        }
    }
}

fn decode_agent(value: Value) -> Option<Agent> {
    match serde_json::from_value(value) {
        Ok(agent) => Some(agent),
        Err(e) => {
            tracing::warn!(error = %e, "skipping undecodable agent record");
            None
        }
    }
}
