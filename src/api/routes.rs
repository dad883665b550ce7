use crate::auth::AuthService;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Assemble the `/api` router.
///
/// Login and logout stay public; the agent CRUD routes sit behind the admin
/// session cookie.
pub fn create_router(auth_service: Arc<AuthService>) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/auth/login", post(crate::api::handlers::auth::login))
        .route("/auth/logout", post(crate::api::handlers::auth::logout));

    let protected_routes = Router::new()
        // Protected routes (admin cookie required)
        .route(
            "/agents",
            get(crate::api::handlers::agents::list_agents)
                .post(crate::api::handlers::agents::upsert_agent)
                .delete(crate::api::handlers::agents::delete_agent),
        )
        .layer(middleware::from_fn(move |req, next| {
            crate::auth::middleware::require_admin(auth_service.clone(), req, next)
        }));

    public_routes.merge(protected_routes)
}
