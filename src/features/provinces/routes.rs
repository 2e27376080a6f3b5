use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::provinces::handlers;
use crate::features::provinces::services::ProvinceService;

/// Create admin routes for the provinces feature
pub fn routes(service: Arc<ProvinceService>) -> Router {
    Router::new()
        .route("/admin/province/save", post(handlers::save_province))
        .route("/admin/province/all", get(handlers::get_all_provinces))
        .with_state(service)
}
