use crate::auth::AuthService;
use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Gate for the admin API: requests without a valid admin session cookie get
/// a 401 JSON body and never reach the handler.
pub async fn require_admin(auth: Arc<AuthService>, req: Request, next: Next) -> Response {
    if !auth.is_authenticated(req.headers()) {
        let body = serde_json::json!({
            "error": "Authentication required"
        });
        return (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response();
    }

    next.run(req).await
}
