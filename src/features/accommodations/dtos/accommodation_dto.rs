use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::accommodations::models::NewAccommodation;
use crate::shared::visibility::VisibilityStatus;

/// Request DTO for a vendor creating an accommodation
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_stay_times"))]
pub struct SaveAccommodationDto {
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

    #[validate(
        length(min = 1, max = 255, message = "Address line 1 must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "Address line 1 must not be blank"
        )
    )]
    pub address_line1: String,

    #[validate(length(max = 255))]
    pub address_line2: Option<String>,

    #[validate(
        length(min = 1, max = 128, message = "City must be 1-128 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "City must not be blank"
        )
    )]
    pub city: String,

    #[validate(
        length(min = 1, max = 128, message = "Province must be 1-128 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "Province must not be blank"
        )
    )]
    pub province: String,

    #[validate(length(max = 32))]
    pub postal_code: Option<String>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,

    #[schema(value_type = String, example = "14:00:00")]
    pub check_in_time: NaiveTime,

    #[schema(value_type = String, example = "11:00:00")]
    pub check_out_time: NaiveTime,

    #[serde(default)]
    pub parking: bool,

    #[serde(default)]
    pub smoking: bool,

    #[serde(default)]
    pub pets: bool,

    pub location_id: i64,

    pub accommodation_type_id: i64,

    /// Base64 pictures; `null` entries are skipped
    #[serde(default)]
    pub accommodation_pictures: Vec<Option<String>>,
}

fn validate_stay_times(dto: &SaveAccommodationDto) -> Result<(), ValidationError> {
    if dto.check_in_time == dto.check_out_time {
        let mut err = ValidationError::new("stay_times");
        err.message = Some("Check-in and check-out times must differ".into());
        return Err(err);
    }
    Ok(())
}

impl SaveAccommodationDto {
    pub fn to_new_accommodation(&self, vendor_id: i64) -> NewAccommodation {
        NewAccommodation {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            telephone: self.telephone.clone(),
            email: self.email.clone(),
            address_line1: self.address_line1.trim().to_string(),
            address_line2: self.address_line2.clone(),
            city: self.city.trim().to_string(),
            province: self.province.trim().to_string(),
            postal_code: self.postal_code.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            check_in_time: self.check_in_time,
            check_out_time: self.check_out_time,
            parking: self.parking,
            smoking: self.smoking,
            pets: self.pets,
            location_id: self.location_id,
            vendor_id,
            accommodation_type_id: self.accommodation_type_id,
        }
    }
}

/// Accommodation view with picture URLs
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub province: String,
    pub postal_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[schema(value_type = String, example = "14:00:00")]
    pub check_in_time: NaiveTime,
    #[schema(value_type = String, example = "11:00:00")]
    pub check_out_time: NaiveTime,
    pub parking: bool,
    pub smoking: bool,
    pub pets: bool,
    pub rating: f64,
    pub rating_count: i32,
    pub status: VisibilityStatus,
    pub location_id: i64,
    pub vendor_id: i64,
    pub accommodation_type_id: i64,
    pub accommodation_pictures: Vec<String>,
    /// Number of room kinds listed under this accommodation
    pub number_of_rooms: i64,
}
