use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::activities::dtos::{ActivityDto, SaveActivityDto};
use crate::features::activities::services::ActivityService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;
use crate::shared::visibility::VisibilityChangeDto;

/// Save an activity
#[utoipa::path(
    post,
    path = "/admin/activity/save",
    request_body = SaveActivityDto,
    responses(
        (status = 200, description = "Activity saved", body = ApiResponse<ActivityDto>),
        (status = 400, description = "Validation error or malformed image"),
        (status = 409, description = "Activity name already exists")
    ),
    tag = "activities",
    security(("bearer_auth" = []))
)]
pub async fn save_activity(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ActivityService>>,
    AppJson(dto): AppJson<SaveActivityDto>,
) -> Result<Json<ApiResponse<ActivityDto>>> {
    let activity = service.save_activity(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(activity),
        Some("Activity saved successfully!".to_string()),
        None,
    )))
}

/// List every activity, visible or not
#[utoipa::path(
    get,
    path = "/admin/activity/all",
    responses(
        (status = 200, description = "List of activities", body = ApiResponse<Vec<ActivityDto>>),
    ),
    tag = "activities",
    security(("bearer_auth" = []))
)]
pub async fn get_all_activities(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ActivityService>>,
) -> Result<Json<ApiResponse<Vec<ActivityDto>>>> {
    let activities = service.get_all_activities().await?;
    Ok(Json(ApiResponse::list(activities)))
}

/// Get activity by id
#[utoipa::path(
    get,
    path = "/admin/activity/{id}",
    params(("id" = i64, Path, description = "Activity id")),
    responses(
        (status = 200, description = "Activity found", body = ApiResponse<ActivityDto>),
        (status = 404, description = "Activity not found")
    ),
    tag = "activities",
    security(("bearer_auth" = []))
)]
pub async fn get_activity(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ActivityService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ActivityDto>>> {
    let activity = service.get_activity_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(activity), None, None)))
}

/// Toggle activity visibility
#[utoipa::path(
    post,
    path = "/admin/activity/status/{id}",
    params(("id" = i64, Path, description = "Activity id")),
    responses(
        (status = 200, description = "Visibility toggled", body = ApiResponse<VisibilityChangeDto>),
        (status = 404, description = "Activity not found")
    ),
    tag = "activities",
    security(("bearer_auth" = []))
)]
pub async fn change_activity_status(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ActivityService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<VisibilityChangeDto>>> {
    let change = service.change_activity_status(id).await?;
    Ok(Json(ApiResponse::success(
        Some(change),
        Some("Activity status changed successfully!".to_string()),
        None,
    )))
}
