use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

/// OAuth2 endpoints; clients authenticate per request, no bearer token required
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/oauth/token", post(handlers::token))
        .route("/oauth/authorize", post(handlers::authorize))
        .with_state(service)
}
