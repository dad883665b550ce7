//! Agent CRUD endpoints.
//!
//! Thin translation layer between HTTP and the registry. Validation happens
//! here, before lowercasing: a name with uppercase characters is rejected
//! outright and can never round-trip through this path.

use crate::agents::Agent;
use crate::types::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

// ============= Request/Response Types =============

/// Request to create or replace an agent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAgentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub assistant_id: Option<String>,
}

/// Query parameters for deleting an agent
#[derive(Debug, Deserialize, Default)]
pub struct DeleteAgentQuery {
    #[serde(default)]
    pub name: Option<String>,
}

/// Response after deleting an agent
#[derive(Debug, Serialize)]
pub struct DeleteAgentResponse {
    pub message: String,
}

// ============= Handlers =============

/// List all registered agents
///
/// GET /api/agents
pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<Agent>> {
    Json(state.registry.list().await)
}

/// Create or replace an agent
///
/// POST /api/agents
pub async fn upsert_agent(
    State(state): State<AppState>,
    Json(req): Json<UpsertAgentRequest>,
) -> Result<Json<Agent>> {
    let (name, assistant_id) = match (non_empty(req.name), non_empty(req.assistant_id)) {
        (Some(name), Some(assistant_id)) => (name, assistant_id),
        _ => {
            return Err(AppError::InvalidInput(
                "Name and assistantId are required".to_string(),
            ));
        }
    };

    if !is_valid_agent_name(&name) {
        return Err(AppError::InvalidInput(
            "Name must contain only lowercase letters, numbers, and hyphens".to_string(),
        ));
    }

    let agent = state
        .registry
        .upsert(&name, &assistant_id)
        .await
        .map_err(|e| {
            tracing::error!(name = %name, error = %e, "error creating agent");
            AppError::Internal("Failed to create agent".to_string())
        })?;

    Ok(Json(agent))
}

/// Delete an agent
///
/// DELETE /api/agents?name=
pub async fn delete_agent(
    State(state): State<AppState>,
    Query(params): Query<DeleteAgentQuery>,
) -> Result<Json<DeleteAgentResponse>> {
    let name = non_empty(params.name)
        .ok_or_else(|| AppError::InvalidInput("Name parameter is required".to_string()))?;

    if state.registry.delete(&name).await {
        Ok(Json(DeleteAgentResponse {
            message: "Agent deleted successfully".to_string(),
        }))
    } else {
        Err(AppError::Internal("Failed to delete agent".to_string()))
    }
}

// ============= Helper Functions =============

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Validate an agent name: lowercase letters, digits and hyphens only.
/// Checked before lowercasing, so uppercase input is a validation error.
pub fn is_valid_agent_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
