use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::public_users::handlers;
use crate::features::public_users::services::PublicUserService;

/// Registration routes reachable without a token
pub fn public_routes(service: Arc<PublicUserService>) -> Router {
    Router::new()
        .route("/public/user/register", post(handlers::register))
        .route("/public/user/verify", post(handlers::verify))
        .with_state(service)
}

/// Profile routes for authenticated public users
pub fn protected_routes(service: Arc<PublicUserService>) -> Router {
    Router::new()
        .route("/public/user/details", get(handlers::get_details))
        .route("/public/user/update", post(handlers::update_details))
        .with_state(service)
}
