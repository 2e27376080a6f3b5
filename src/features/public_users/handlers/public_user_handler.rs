use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequirePublicUser;
use crate::features::public_users::dtos::{
    PublicUserCodeVerifyDto, PublicUserDetailsDto, PublicUserRegistrationDto,
    PublicUserRegistrationResponseDto, UpdatePublicUserDto,
};
use crate::features::public_users::services::PublicUserService;
use crate::shared::types::ApiResponse;

/// Register a public user account
#[utoipa::path(
    post,
    path = "/public/user/register",
    request_body = PublicUserRegistrationDto,
    responses(
        (status = 200, description = "Registered, verification pending", body = ApiResponse<PublicUserRegistrationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "public-users"
)]
pub async fn register(
    State(service): State<Arc<PublicUserService>>,
    AppJson(dto): AppJson<PublicUserRegistrationDto>,
) -> Result<Json<ApiResponse<PublicUserRegistrationResponseDto>>> {
    let registration = service.register(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(registration),
        Some("Verification code sent to your email".to_string()),
        None,
    )))
}

/// Confirm the emailed verification code
#[utoipa::path(
    post,
    path = "/public/user/verify",
    request_body = PublicUserCodeVerifyDto,
    responses(
        (status = 200, description = "Account activated"),
        (status = 400, description = "Invalid or expired code"),
        (status = 404, description = "User not found")
    ),
    tag = "public-users"
)]
pub async fn verify(
    State(service): State<Arc<PublicUserService>>,
    AppJson(dto): AppJson<PublicUserCodeVerifyDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.verify(dto).await?;
    Ok(Json(ApiResponse::message("Account verified successfully!")))
}

/// Profile of the authenticated public user
#[utoipa::path(
    get,
    path = "/public/user/details",
    responses(
        (status = 200, description = "Profile", body = ApiResponse<PublicUserDetailsDto>),
        (status = 403, description = "Not a public user"),
        (status = 404, description = "Profile not found")
    ),
    tag = "public-users",
    security(("bearer_auth" = []))
)]
pub async fn get_details(
    RequirePublicUser(user): RequirePublicUser,
    State(service): State<Arc<PublicUserService>>,
) -> Result<Json<ApiResponse<PublicUserDetailsDto>>> {
    let details = service.get_details(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(details), None, None)))
}

/// Replace the editable profile fields
#[utoipa::path(
    post,
    path = "/public/user/update",
    request_body = UpdatePublicUserDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<PublicUserDetailsDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not a public user")
    ),
    tag = "public-users",
    security(("bearer_auth" = []))
)]
pub async fn update_details(
    RequirePublicUser(user): RequirePublicUser,
    State(service): State<Arc<PublicUserService>>,
    AppJson(dto): AppJson<UpdatePublicUserDto>,
) -> Result<Json<ApiResponse<PublicUserDetailsDto>>> {
    let details = service.update_details(user.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(details),
        Some("Details updated successfully!".to_string()),
        None,
    )))
}
