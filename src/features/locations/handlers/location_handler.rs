use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::locations::dtos::{
    LocationDetailDto, LocationSummaryDto, SaveLocationDto, SearchQuery, UpdateLocationDto,
};
use crate::features::locations::services::LocationService;
use crate::shared::types::ApiResponse;
use crate::shared::visibility::VisibilityChangeDto;

/// Create a location with pictures and activity links
#[utoipa::path(
    post,
    path = "/admin/location/save",
    request_body = SaveLocationDto,
    responses(
        (status = 200, description = "Location saved", body = ApiResponse<LocationDetailDto>),
        (status = 400, description = "Validation error or malformed picture"),
        (status = 404, description = "Province or activity not found"),
        (status = 409, description = "Location name already exists")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn save_location(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<LocationService>>,
    AppJson(dto): AppJson<SaveLocationDto>,
) -> Result<Json<ApiResponse<LocationDetailDto>>> {
    tracing::debug!("Admin {} saving location {}", admin.username, dto.name);
    let location = service.create_location(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(location),
        Some("Location saved successfully!".to_string()),
        None,
    )))
}

/// Update a location's fields, activity links and pictures
#[utoipa::path(
    post,
    path = "/admin/location/update",
    request_body = UpdateLocationDto,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<LocationDetailDto>),
        (status = 400, description = "Validation error or malformed picture"),
        (status = 404, description = "Location, province or activity not found"),
        (status = 409, description = "Location name already exists")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn update_location(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<LocationService>>,
    AppJson(dto): AppJson<UpdateLocationDto>,
) -> Result<Json<ApiResponse<LocationDetailDto>>> {
    let location = service.update_location(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(location),
        Some("Location updated successfully!".to_string()),
        None,
    )))
}

/// Toggle location visibility
#[utoipa::path(
    post,
    path = "/admin/location/status/{id}",
    params(("id" = i64, Path, description = "Location id")),
    responses(
        (status = 200, description = "Visibility toggled", body = ApiResponse<VisibilityChangeDto>),
        (status = 404, description = "Location not found")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn change_location_status(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<VisibilityChangeDto>>> {
    let change = service.change_location_status(id).await?;
    Ok(Json(ApiResponse::success(
        Some(change),
        Some("Location status changed successfully!".to_string()),
        None,
    )))
}

/// List locations, optionally filtered by name
#[utoipa::path(
    get,
    path = "/admin/location/all",
    params(SearchQuery),
    responses(
        (status = 200, description = "List of locations", body = ApiResponse<Vec<LocationSummaryDto>>),
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn get_all_locations(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<LocationService>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<LocationSummaryDto>>>> {
    let locations = service.get_all_locations(query.text()).await?;
    Ok(Json(ApiResponse::list(locations)))
}

/// Composite location view
#[utoipa::path(
    get,
    path = "/admin/location/{id}",
    params(("id" = i64, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location found", body = ApiResponse<LocationDetailDto>),
        (status = 404, description = "Location not found")
    ),
    tag = "locations",
    security(("bearer_auth" = []))
)]
pub async fn get_location(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<LocationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<LocationDetailDto>>> {
    let location = service.get_location_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(location), None, None)))
}
