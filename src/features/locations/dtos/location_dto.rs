use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::locations::dtos::LocationAttractionDto;
use crate::features::locations::models::NewLocation;
use crate::shared::visibility::VisibilityStatus;

/// Reference to an existing activity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityRefDto {
    pub id: i64,
}

/// Request DTO for creating a location
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveLocationDto {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "Name must not be blank"
        )
    )]
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0, message = "Minimum spending days cannot be negative"))]
    #[serde(default)]
    pub minimum_spending_days: i32,

    pub province_id: i64,

    /// Base64 pictures; `null` entries are skipped
    #[serde(default)]
    pub location_pictures: Vec<Option<String>>,

    #[serde(default)]
    pub location_activities: Vec<ActivityRefDto>,
}

impl SaveLocationDto {
    pub fn to_new_location(&self) -> NewLocation {
        NewLocation {
            name: self.name.trim().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            description: self.description.clone(),
            minimum_spending_days: self.minimum_spending_days,
            province_id: self.province_id,
        }
    }

    /// Referenced activity ids, first occurrence wins
    pub fn activity_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = Vec::with_capacity(self.location_activities.len());
        for activity in &self.location_activities {
            if !ids.contains(&activity.id) {
                ids.push(activity.id);
            }
        }
        ids
    }
}

/// Request DTO for updating a location.
///
/// Replaces the location's fields and its activity links; pictures listed here
/// are appended to the existing ones.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationDto {
    pub id: i64,

    #[serde(flatten)]
    #[validate(nested)]
    pub location: SaveLocationDto,
}

/// Activity catalog entry flagged with whether it is linked to a location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationActivityDto {
    pub id: i64,
    pub activity_name: String,
    pub image: String,
    pub visibility_status: VisibilityStatus,
    pub selected: bool,
}

/// Location list entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummaryDto {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub minimum_spending_days: i32,
    pub visibility_status: VisibilityStatus,
    pub province_id: i64,
    pub province_name: String,
    pub modified_date_time: String,
    pub number_of_activities: i64,
    pub number_of_attractions: i64,
}

/// Composite location view: own fields, province, pictures, activity catalog and attractions
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetailDto {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub minimum_spending_days: i32,
    pub visibility_status: VisibilityStatus,
    pub province_id: i64,
    pub province_name: String,
    pub modified_date_time: String,
    pub number_of_activities: i64,
    pub number_of_attractions: i64,
    pub location_pictures: Vec<String>,
    pub location_activities: Vec<LocationActivityDto>,
    pub location_attractions: Vec<LocationAttractionDto>,
}
