use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::accommodations::models::AccommodationType;

/// Request DTO for saving an accommodation type
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveAccommodationTypeDto {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "Name must not be blank"
        )
    )]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationTypeDto {
    pub id: i64,
    pub name: String,
}

impl From<AccommodationType> for AccommodationTypeDto {
    fn from(t: AccommodationType) -> Self {
        Self {
            id: t.id,
            name: t.name,
        }
    }
}
