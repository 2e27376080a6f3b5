use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::provinces::models::Province;

/// Request DTO for saving a province
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveProvinceDto {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "Name must not be blank"
        )
    )]
    pub name: String,
}

/// Response DTO for province
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceDto {
    pub id: i64,
    pub name: String,
}

impl From<Province> for ProvinceDto {
    fn from(p: Province) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}
