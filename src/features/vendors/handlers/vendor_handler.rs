use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::{RequireAdmin, RequireVendor};
use crate::features::vendors::dtos::{SaveVendorDto, VendorDto};
use crate::features::vendors::services::VendorService;
use crate::shared::types::ApiResponse;

/// Create a vendor account
#[utoipa::path(
    post,
    path = "/admin/vendor/save",
    request_body = SaveVendorDto,
    responses(
        (status = 200, description = "Vendor saved", body = ApiResponse<VendorDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already exists")
    ),
    tag = "vendors",
    security(("bearer_auth" = []))
)]
pub async fn save_vendor(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<VendorService>>,
    AppJson(dto): AppJson<SaveVendorDto>,
) -> Result<Json<ApiResponse<VendorDto>>> {
    tracing::debug!("Admin {} saving vendor {}", admin.username, dto.username);
    let vendor = service.save_vendor(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(vendor),
        Some("Vendor saved successfully!".to_string()),
        None,
    )))
}

/// List all vendors
#[utoipa::path(
    get,
    path = "/admin/vendor/all",
    responses(
        (status = 200, description = "List of vendors", body = ApiResponse<Vec<VendorDto>>),
    ),
    tag = "vendors",
    security(("bearer_auth" = []))
)]
pub async fn get_all_vendors(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<VendorService>>,
) -> Result<Json<ApiResponse<Vec<VendorDto>>>> {
    let vendors = service.get_all_vendors().await?;
    Ok(Json(ApiResponse::list(vendors)))
}

/// Profile of the authenticated vendor
#[utoipa::path(
    get,
    path = "/vendor/profile",
    responses(
        (status = 200, description = "Vendor profile", body = ApiResponse<VendorDto>),
        (status = 403, description = "Not a vendor"),
        (status = 404, description = "Vendor not found")
    ),
    tag = "vendors",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    RequireVendor(vendor): RequireVendor,
    State(service): State<Arc<VendorService>>,
) -> Result<Json<ApiResponse<VendorDto>>> {
    let profile = service.get_profile(vendor.user_id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
