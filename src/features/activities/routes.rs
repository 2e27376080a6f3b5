use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::activities::handlers;
use crate::features::activities::services::ActivityService;

/// Create admin routes for the activity catalog
pub fn routes(service: Arc<ActivityService>) -> Router {
    Router::new()
        .route("/admin/activity/save", post(handlers::save_activity))
        .route("/admin/activity/all", get(handlers::get_all_activities))
        .route(
            "/admin/activity/status/{id}",
            post(handlers::change_activity_status),
        )
        .route("/admin/activity/{id}", get(handlers::get_activity))
        .with_state(service)
}
