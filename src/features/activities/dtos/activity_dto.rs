use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::visibility::VisibilityStatus;

/// Request DTO for saving an activity
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveActivityDto {
    #[validate(
        length(min = 1, max = 255, message = "Activity name must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "Activity name must not be blank"
        )
    )]
    pub activity_name: String,

    /// Base64 image (bare or as a data URL)
    pub image: Option<String>,
}

/// Response DTO for an activity catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: i64,
    pub activity_name: String,
    /// URL the image bytes are served from
    pub image: String,
    pub visibility_status: VisibilityStatus,
}
