use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::accommodations::dtos::{AccommodationDto, SaveAccommodationDto};
use crate::features::accommodations::services::AccommodationService;
use crate::features::auth::guards::RequireVendor;
use crate::shared::types::ApiResponse;
use crate::shared::visibility::VisibilityChangeDto;

/// Create an accommodation owned by the authenticated vendor
#[utoipa::path(
    post,
    path = "/vendor/accommodation/save",
    request_body = SaveAccommodationDto,
    responses(
        (status = 200, description = "Accommodation saved", body = ApiResponse<AccommodationDto>),
        (status = 400, description = "Validation error or malformed picture"),
        (status = 404, description = "Accommodation type or location not found")
    ),
    tag = "accommodations",
    security(("bearer_auth" = []))
)]
pub async fn save_accommodation(
    RequireVendor(vendor): RequireVendor,
    State(service): State<Arc<AccommodationService>>,
    AppJson(dto): AppJson<SaveAccommodationDto>,
) -> Result<Json<ApiResponse<AccommodationDto>>> {
    let accommodation = service.create_accommodation(vendor.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(accommodation),
        Some("Accommodation saved successfully!".to_string()),
        None,
    )))
}

/// List the vendor's own accommodations
#[utoipa::path(
    get,
    path = "/vendor/accommodation/all",
    responses(
        (status = 200, description = "List of accommodations", body = ApiResponse<Vec<AccommodationDto>>),
    ),
    tag = "accommodations",
    security(("bearer_auth" = []))
)]
pub async fn get_vendor_accommodations(
    RequireVendor(vendor): RequireVendor,
    State(service): State<Arc<AccommodationService>>,
) -> Result<Json<ApiResponse<Vec<AccommodationDto>>>> {
    let accommodations = service.get_vendor_accommodations(vendor.user_id).await?;
    Ok(Json(ApiResponse::list(accommodations)))
}

/// Get one of the vendor's accommodations
#[utoipa::path(
    get,
    path = "/vendor/accommodation/{id}",
    params(("id" = i64, Path, description = "Accommodation id")),
    responses(
        (status = 200, description = "Accommodation found", body = ApiResponse<AccommodationDto>),
        (status = 404, description = "Accommodation not found")
    ),
    tag = "accommodations",
    security(("bearer_auth" = []))
)]
pub async fn get_vendor_accommodation(
    RequireVendor(vendor): RequireVendor,
    State(service): State<Arc<AccommodationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<AccommodationDto>>> {
    let accommodation = service.get_vendor_accommodation(vendor.user_id, id).await?;
    Ok(Json(ApiResponse::success(Some(accommodation), None, None)))
}

/// Toggle the status of one of the vendor's accommodations
#[utoipa::path(
    post,
    path = "/vendor/accommodation/status/{id}",
    params(("id" = i64, Path, description = "Accommodation id")),
    responses(
        (status = 200, description = "Status toggled", body = ApiResponse<VisibilityChangeDto>),
        (status = 404, description = "Accommodation not found")
    ),
    tag = "accommodations",
    security(("bearer_auth" = []))
)]
pub async fn change_accommodation_status(
    RequireVendor(vendor): RequireVendor,
    State(service): State<Arc<AccommodationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<VisibilityChangeDto>>> {
    let change = service
        .change_vendor_accommodation_status(vendor.user_id, id)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(change),
        Some("Accommodation status changed successfully!".to_string()),
        None,
    )))
}
