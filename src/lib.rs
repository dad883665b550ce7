//! # Voxboard - Voice Agent Board
//!
//! A small web application for registering named voice agents and serving
//! each one at a public URL with an embedded call widget. Agents are a
//! pairing of a URL slug and an external voice-assistant identifier; call
//! handling itself is delegated entirely to the browser-side SDK.
//!
//! ## Overview
//!
//! Voxboard can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `voxboard-server` binary
//! 2. **As a library** - Import the registry and storage components
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use voxboard::agents::AgentRegistry;
//! use voxboard::kv::KvProvider;
//!
//! # async fn run() -> voxboard::types::Result<()> {
//! let store = KvProvider::File { path: ".agents.json".into() }.create_store()?;
//! let registry = AgentRegistry::new(store);
//!
//! let agent = registry.upsert("support-bot", "asst-123").await?;
//! assert_eq!(agent.name, "support-bot");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - Agent records and the registry over the key-value store
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Shared-password login and the admin session cookie
//! - [`kv`] - Key-value storage abstraction (hosted or file-backed)
//! - [`web`] - Server-rendered pages
//! - [`types`] - Common types and error handling
//!
//! ## Architecture
//!
//! The storage backend is chosen once at startup: a hosted Redis-REST store
//! when usable credentials are configured, otherwise a local JSON file. The
//! selection is immutable for the process lifetime.

/// Agent records and the registry that owns them.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Shared-password authentication and the admin session cookie.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// Key-value storage abstraction (hosted or file-backed).
pub mod kv;
/// Common types (errors, result alias).
pub mod types;
/// Configuration utilities.
pub mod utils;
/// Server-rendered pages.
pub mod web;

// Re-export commonly used types
pub use agents::{Agent, AgentRegistry};
pub use auth::AuthService;
pub use kv::{KvProvider, KvStore};
pub use types::{AppError, Result};
pub use utils::config::Config;

use axum::Router;
use minijinja::Environment;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Typed configuration, loaded once from the environment
    pub config: Arc<Config>,
    /// Agent registry over the selected storage backend
    pub registry: AgentRegistry,
    /// Authentication service for the admin surface
    pub auth: Arc<AuthService>,
    /// Shared template environment
    pub templates: Arc<Environment<'static>>,
}

impl AppState {
    /// Build application state from configuration, selecting the storage
    /// backend once.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = KvProvider::from_config(&config.kv).create_store()?;
        let auth = Arc::new(AuthService::new(
            config.admin.password.clone(),
            config.production,
        ));

        Ok(Self {
            config: Arc::new(config),
            registry: AgentRegistry::new(store),
            auth,
            templates: Arc::new(web::environment()?),
        })
    }
}

/// Assemble the full application router: pages at the root, the JSON API
/// under `/api`, request tracing and a permissive CORS layer.
pub fn app(state: AppState) -> Router {
    let api = api::routes::create_router(state.auth.clone());

    Router::new()
        .merge(web::router())
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
