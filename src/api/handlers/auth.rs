//! Admin login and logout endpoints.

use crate::types::{AppError, Result};
use crate::AppState;
use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

/// Login request carrying the shared admin password
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// Authenticate with the shared admin password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response> {
    let password = req.password.unwrap_or_default();
    if !state.auth.verify_password(&password) {
        return Err(AppError::Auth("Invalid password".to_string()));
    }

    let body = serde_json::json!({ "success": true });
    Ok(([(SET_COOKIE, state.auth.login_cookie())], Json(body)).into_response())
}

/// Clear the admin session cookie
///
/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> Response {
    let body = serde_json::json!({ "success": true });
    ([(SET_COOKIE, state.auth.logout_cookie())], Json(body)).into_response()
}
