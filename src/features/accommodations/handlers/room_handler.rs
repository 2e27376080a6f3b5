use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::accommodations::dtos::{RoomDto, SaveRoomDto};
use crate::features::accommodations::services::AccommodationService;
use crate::features::auth::guards::RequireVendor;
use crate::shared::types::ApiResponse;

/// Add a room to one of the vendor's accommodations
#[utoipa::path(
    post,
    path = "/vendor/accommodation/room/save",
    request_body = SaveRoomDto,
    responses(
        (status = 200, description = "Room saved", body = ApiResponse<RoomDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Accommodation not found"),
        (status = 409, description = "Room name already used in this accommodation")
    ),
    tag = "accommodations",
    security(("bearer_auth" = []))
)]
pub async fn save_room(
    RequireVendor(vendor): RequireVendor,
    State(service): State<Arc<AccommodationService>>,
    AppJson(dto): AppJson<SaveRoomDto>,
) -> Result<Json<ApiResponse<RoomDto>>> {
    let room = service.save_room(vendor.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(room),
        Some("Room saved successfully!".to_string()),
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/vendor/accommodation/{id}/rooms",
    params(("id" = i64, Path, description = "Accommodation id")),
    responses(
        (status = 200, description = "Rooms of the accommodation", body = ApiResponse<Vec<RoomDto>>),
        (status = 404, description = "Accommodation not found")
    ),
    tag = "accommodations",
    security(("bearer_auth" = []))
)]
pub async fn get_rooms(
    RequireVendor(vendor): RequireVendor,
    State(service): State<Arc<AccommodationService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>> {
    let rooms = service.get_rooms(vendor.user_id, id).await?;
    Ok(Json(ApiResponse::list(rooms)))
}
