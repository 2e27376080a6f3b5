use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::locations::dtos::{
    LocationAttractionDto, SaveLocationAttractionDto, SearchQuery, UpdateLocationAttractionDto,
};
use crate::features::locations::services::AttractionService;
use crate::shared::types::ApiResponse;
use crate::shared::visibility::VisibilityChangeDto;

/// Create a location attraction with pictures
#[utoipa::path(
    post,
    path = "/admin/location/attraction/save",
    request_body = SaveLocationAttractionDto,
    responses(
        (status = 200, description = "Attraction saved", body = ApiResponse<LocationAttractionDto>),
        (status = 400, description = "Validation error or malformed picture"),
        (status = 404, description = "Location not found"),
        (status = 409, description = "Attraction name already exists")
    ),
    tag = "location-attractions",
    security(("bearer_auth" = []))
)]
pub async fn save_attraction(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AttractionService>>,
    AppJson(dto): AppJson<SaveLocationAttractionDto>,
) -> Result<Json<ApiResponse<LocationAttractionDto>>> {
    let attraction = service.create_attraction(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(attraction),
        Some("Location attraction saved successfully!".to_string()),
        None,
    )))
}

/// Update a location attraction
#[utoipa::path(
    post,
    path = "/admin/location/attraction/update",
    request_body = UpdateLocationAttractionDto,
    responses(
        (status = 200, description = "Attraction updated", body = ApiResponse<LocationAttractionDto>),
        (status = 400, description = "Validation error or malformed picture"),
        (status = 404, description = "Attraction or location not found"),
        (status = 409, description = "Attraction name already exists")
    ),
    tag = "location-attractions",
    security(("bearer_auth" = []))
)]
pub async fn update_attraction(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AttractionService>>,
    AppJson(dto): AppJson<UpdateLocationAttractionDto>,
) -> Result<Json<ApiResponse<LocationAttractionDto>>> {
    let attraction = service.update_attraction(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(attraction),
        Some("Location attraction updated successfully!".to_string()),
        None,
    )))
}

/// Toggle attraction visibility
#[utoipa::path(
    post,
    path = "/admin/location/attraction/status/{id}",
    params(("id" = i64, Path, description = "Attraction id")),
    responses(
        (status = 200, description = "Visibility toggled", body = ApiResponse<VisibilityChangeDto>),
        (status = 404, description = "Attraction not found")
    ),
    tag = "location-attractions",
    security(("bearer_auth" = []))
)]
pub async fn change_attraction_status(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AttractionService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<VisibilityChangeDto>>> {
    let change = service.change_attraction_status(id).await?;
    Ok(Json(ApiResponse::success(
        Some(change),
        Some("Location attraction status changed successfully!".to_string()),
        None,
    )))
}

/// Search attractions by name substring, ignoring case
#[utoipa::path(
    get,
    path = "/admin/location/attraction/all",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching attractions", body = ApiResponse<Vec<LocationAttractionDto>>),
    ),
    tag = "location-attractions",
    security(("bearer_auth" = []))
)]
pub async fn search_attractions(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AttractionService>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<LocationAttractionDto>>>> {
    let attractions = service.search_attractions(query.text()).await?;
    Ok(Json(ApiResponse::list(attractions)))
}

/// Get attraction by id
#[utoipa::path(
    get,
    path = "/admin/location/attraction/{id}",
    params(("id" = i64, Path, description = "Attraction id")),
    responses(
        (status = 200, description = "Attraction found", body = ApiResponse<LocationAttractionDto>),
        (status = 404, description = "Attraction not found")
    ),
    tag = "location-attractions",
    security(("bearer_auth" = []))
)]
pub async fn get_attraction(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AttractionService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<LocationAttractionDto>>> {
    let attraction = service.get_attraction_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(attraction), None, None)))
}
