use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::accommodations::dtos::{
    AccommodationDto, AccommodationTypeDto, SaveAccommodationTypeDto,
};
use crate::features::accommodations::services::AccommodationService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;

/// Save an accommodation type
#[utoipa::path(
    post,
    path = "/admin/accommodation-type/save",
    request_body = SaveAccommodationTypeDto,
    responses(
        (status = 200, description = "Accommodation type saved", body = ApiResponse<AccommodationTypeDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already exists")
    ),
    tag = "accommodations",
    security(("bearer_auth" = []))
)]
pub async fn save_accommodation_type(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AccommodationService>>,
    AppJson(dto): AppJson<SaveAccommodationTypeDto>,
) -> Result<Json<ApiResponse<AccommodationTypeDto>>> {
    let accommodation_type = service.save_type(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(accommodation_type),
        Some("Accommodation type saved successfully!".to_string()),
        None,
    )))
}

/// List accommodation types
#[utoipa::path(
    get,
    path = "/admin/accommodation-type/all",
    responses(
        (status = 200, description = "List of accommodation types", body = ApiResponse<Vec<AccommodationTypeDto>>),
    ),
    tag = "accommodations",
    security(("bearer_auth" = []))
)]
pub async fn get_all_accommodation_types(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AccommodationService>>,
) -> Result<Json<ApiResponse<Vec<AccommodationTypeDto>>>> {
    let types = service.get_all_types().await?;
    Ok(Json(ApiResponse::list(types)))
}

/// List every accommodation across vendors
#[utoipa::path(
    get,
    path = "/admin/accommodation/all",
    responses(
        (status = 200, description = "List of accommodations", body = ApiResponse<Vec<AccommodationDto>>),
    ),
    tag = "accommodations",
    security(("bearer_auth" = []))
)]
pub async fn get_all_accommodations(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AccommodationService>>,
) -> Result<Json<ApiResponse<Vec<AccommodationDto>>>> {
    let accommodations = service.get_all_accommodations().await?;
    Ok(Json(ApiResponse::list(accommodations)))
}
