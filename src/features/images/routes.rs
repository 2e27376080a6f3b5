use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::images::handlers;
use crate::features::images::services::ImageService;

/// Public picture routes
pub fn routes(service: Arc<ImageService>) -> Router {
    Router::new()
        .route("/image/{kind}/{id}", get(handlers::get_image))
        .with_state(service)
}
