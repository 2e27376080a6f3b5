use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::locations::handlers;
use crate::features::locations::services::{AttractionService, LocationService};

/// Create admin routes for locations and their attractions
pub fn routes(locations: Arc<LocationService>, attractions: Arc<AttractionService>) -> Router {
    let location_routes = Router::new()
        .route("/admin/location/save", post(handlers::save_location))
        .route("/admin/location/update", post(handlers::update_location))
        .route(
            "/admin/location/status/{id}",
            post(handlers::change_location_status),
        )
        .route("/admin/location/all", get(handlers::get_all_locations))
        .route("/admin/location/{id}", get(handlers::get_location))
        .with_state(locations);

    let attraction_routes = Router::new()
        .route(
            "/admin/location/attraction/save",
            post(handlers::save_attraction),
        )
        .route(
            "/admin/location/attraction/update",
            post(handlers::update_attraction),
        )
        .route(
            "/admin/location/attraction/status/{id}",
            post(handlers::change_attraction_status),
        )
        .route(
            "/admin/location/attraction/all",
            get(handlers::search_attractions),
        )
        .route(
            "/admin/location/attraction/{id}",
            get(handlers::get_attraction),
        )
        .with_state(attractions);

    location_routes.merge(attraction_routes)
}
