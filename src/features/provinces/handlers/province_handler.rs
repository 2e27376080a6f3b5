use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::provinces::dtos::{ProvinceDto, SaveProvinceDto};
use crate::features::provinces::services::ProvinceService;
use crate::shared::types::ApiResponse;

/// Save a province
#[utoipa::path(
    post,
    path = "/admin/province/save",
    request_body = SaveProvinceDto,
    responses(
        (status = 200, description = "Province saved", body = ApiResponse<ProvinceDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Province name already exists")
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn save_province(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProvinceService>>,
    AppJson(dto): AppJson<SaveProvinceDto>,
) -> Result<Json<ApiResponse<ProvinceDto>>> {
    let province = service.save_province(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(province),
        Some("Province saved successfully!".to_string()),
        None,
    )))
}

/// List all provinces
#[utoipa::path(
    get,
    path = "/admin/province/all",
    responses(
        (status = 200, description = "List of provinces", body = ApiResponse<Vec<ProvinceDto>>),
    ),
    tag = "provinces",
    security(("bearer_auth" = []))
)]
pub async fn get_all_provinces(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProvinceService>>,
) -> Result<Json<ApiResponse<Vec<ProvinceDto>>>> {
    let provinces = service.get_all_provinces().await?;
    Ok(Json(ApiResponse::list(provinces)))
}
