use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::accommodations::handlers;
use crate::features::accommodations::services::AccommodationService;

/// Create admin and vendor routes for accommodations
pub fn routes(service: Arc<AccommodationService>) -> Router {
    Router::new()
        .route(
            "/admin/accommodation-type/save",
            post(handlers::save_accommodation_type),
        )
        .route(
            "/admin/accommodation-type/all",
            get(handlers::get_all_accommodation_types),
        )
        .route(
            "/admin/accommodation/all",
            get(handlers::get_all_accommodations),
        )
        .route(
            "/vendor/accommodation/save",
            post(handlers::save_accommodation),
        )
        .route(
            "/vendor/accommodation/all",
            get(handlers::get_vendor_accommodations),
        )
        .route(
            "/vendor/accommodation/status/{id}",
            post(handlers::change_accommodation_status),
        )
        .route(
            "/vendor/accommodation/{id}",
            get(handlers::get_vendor_accommodation),
        )
        .route(
            "/vendor/accommodation/room/save",
            post(handlers::save_room),
        )
        .route(
            "/vendor/accommodation/{id}/rooms",
            get(handlers::get_rooms),
        )
        .with_state(service)
}
