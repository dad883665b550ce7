//! Server-rendered pages.
//!
//! The public surface is intentionally thin: a landing page, the admin CRUD
//! panel (a fetch-based form over `/api/agents`), a login form and the
//! per-agent call page that hands the assistant id and publishable key to
//! the browser-side voice SDK widget. All rendering goes through one shared
//! minijinja environment with templates embedded at compile time.

use crate::types::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use minijinja::{context, Environment};

/// Templates embedded at compile time.
const TEMPLATES: &[(&str, &str)] = &[
    ("home.html", include_str!("templates/home.html")),
    ("login.html", include_str!("templates/login.html")),
    ("admin.html", include_str!("templates/admin.html")),
    ("agent.html", include_str!("templates/agent.html")),
    ("not_found.html", include_str!("templates/not_found.html")),
    (
        "config_error.html",
        include_str!("templates/config_error.html"),
    ),
];

/// Build the template environment. Called once at startup; the environment
/// is shared read-only through `AppState`.
pub fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)
            .map_err(|e| AppError::Internal(format!("Invalid template {}: {}", name, e)))?;
    }
    Ok(env)
}

/// Page routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/admin", get(admin))
        .route("/admin/login", get(admin_login))
        .route("/agent/{name}", get(agent_page))
}

fn render(state: &AppState, name: &str, ctx: minijinja::Value) -> Result<Html<String>> {
    let template = state
        .templates
        .get_template(name)
        .map_err(|e| AppError::Internal(format!("Missing template: {}", e)))?;
    let body = template
        .render(ctx)
        .map_err(|e| AppError::Internal(format!("Template render failed: {}", e)))?;
    Ok(Html(body))
}

/// GET /
async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, "home.html", context! {})
}

/// GET /admin — redirects to the login form without a valid session cookie.
async fn admin(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if !state.auth.is_authenticated(&headers) {
        return Ok(Redirect::to("/admin/login").into_response());
    }
    Ok(render(&state, "admin.html", context! {})?.into_response())
}

/// GET /admin/login
async fn admin_login(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, "login.html", context! {})
}

/// GET /agent/{name} — the public call page.
///
/// A missing publishable key renders a configuration-error page; an unknown
/// name renders the not-found page with a 404 status. A failed lookup is
/// indistinguishable from absence by design.
async fn agent_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response> {
    let public_key = match &state.config.vapi.public_key {
        Some(key) if !key.is_empty() => key.clone(),
        _ => {
            return Ok(render(&state, "config_error.html", context! {})?.into_response());
        }
    };

    let Some(agent) = state.registry.get(&name).await else {
        let body = render(&state, "not_found.html", context! { name => name })?;
        return Ok((StatusCode::NOT_FOUND, body).into_response());
    };

    let body = render(
        &state,
        "agent.html",
        context! {
            agent_name => agent.name,
            assistant_id => agent.assistant_id,
            public_key => public_key,
        },
    )?;
    Ok(body.into_response())
}
