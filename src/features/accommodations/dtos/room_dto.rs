use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::accommodations::models::{NewRoom, Room};
use crate::shared::visibility::VisibilityStatus;

/// Request DTO for a vendor adding a room to one of their accommodations
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveRoomDto {
    pub accommodation_id: i64,

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

    #[validate(range(min = 1, max = 100, message = "Max occupancy must be 1-100"))]
    pub max_occupancy: i32,

    /// Number of identical rooms of this kind
    #[serde(default = "default_room_count")]
    #[validate(range(min = 1, message = "Room count must be at least 1"))]
    pub room_count: i32,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price_per_night: f64,
}

fn default_room_count() -> i32 {
    1
}

impl SaveRoomDto {
    pub fn to_new_room(&self) -> NewRoom {
        NewRoom {
            accommodation_id: self.accommodation_id,
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            max_occupancy: self.max_occupancy,
            room_count: self.room_count,
            price_per_night: self.price_per_night,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: i64,
    pub accommodation_id: i64,
    pub name: String,
    pub description: String,
    pub max_occupancy: i32,
    pub room_count: i32,
    pub price_per_night: f64,
    pub status: VisibilityStatus,
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            accommodation_id: room.accommodation_id,
            name: room.name,
            description: room.description,
            max_occupancy: room.max_occupancy,
            room_count: room.room_count,
            price_per_night: room.price_per_night,
            status: room.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_room_count_defaults_to_one() {
        let dto: SaveRoomDto = serde_json::from_value(json!({
            "accommodationId": 1,
            "name": "Deluxe Double",
            "maxOccupancy": 2,
            "pricePerNight": 85.0
        }))
        .unwrap();

        assert!(dto.validate().is_ok());
        assert_eq!(dto.room_count, 1);
    }

    #[test]
    fn test_zero_occupancy_and_negative_price_are_invalid() {
        let dto: SaveRoomDto = serde_json::from_value(json!({
            "accommodationId": 1,
            "name": "Broken",
            "maxOccupancy": 0,
            "pricePerNight": -1.0
        }))
        .unwrap();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("max_occupancy"));
        assert!(fields.contains_key("price_per_night"));
    }
}
