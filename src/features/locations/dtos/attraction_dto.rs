use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::locations::models::NewLocationAttraction;
use crate::shared::visibility::VisibilityStatus;

/// Request DTO for creating a location attraction
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveLocationAttractionDto {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "Name must not be blank"
        )
    )]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Telephone must contain digits, spaces or hyphens"
    ))]
    pub telephone: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    pub location_id: i64,

    /// Base64 pictures; `null` entries are skipped
    #[serde(default)]
    pub location_attraction_pictures: Vec<Option<String>>,
}

impl SaveLocationAttractionDto {
    pub fn to_new_attraction(&self) -> NewLocationAttraction {
        NewLocationAttraction {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            telephone: self.telephone.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            location_id: self.location_id,
        }
    }
}

/// Request DTO for updating a location attraction; pictures are appended
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationAttractionDto {
    pub id: i64,

    #[serde(flatten)]
    #[validate(nested)]
    pub attraction: SaveLocationAttractionDto,
}

/// Per-attraction view with picture URLs
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationAttractionDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub visibility_status: VisibilityStatus,
    pub location_id: i64,
    pub location_attraction_pictures: Vec<String>,
}
