use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::UserStatus;
use crate::features::vendors::models::Vendor;
use crate::shared::datetime::format_medium;

/// Request DTO for an admin creating a vendor account
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveVendorDto {
    #[validate(
        length(min = 3, max = 64, message = "Username must be 3-64 characters"),
        regex(
            path = "*crate::shared::validation::USERNAME_REGEX",
            message = "Username must start with a letter or underscore"
        )
    )]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(
        length(min = 1, max = 255, message = "Business name must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "Business name must not be blank"
        )
    )]
    pub business_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Telephone must contain digits, spaces or hyphens"
    ))]
    pub telephone: Option<String>,

    pub address: Option<String>,
}

/// Response DTO for vendor
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendorDto {
    pub id: i64,
    pub username: String,
    pub status: UserStatus,
    pub business_name: String,
    pub email: String,
    pub telephone: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
}

impl VendorDto {
    pub fn new(username: String, status: UserStatus, vendor: Vendor) -> Self {
        Self {
            id: vendor.id,
            username,
            status,
            business_name: vendor.business_name,
            email: vendor.email,
            telephone: vendor.telephone,
            address: vendor.address,
            created_at: format_medium(&vendor.created_at),
        }
    }
}
