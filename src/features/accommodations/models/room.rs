use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::shared::visibility::VisibilityStatus;

/// Bookable room type offered by an accommodation
#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: i64,
    pub accommodation_id: i64,
    pub name: String,
    pub description: String,
    pub max_occupancy: i32,
    pub room_count: i32,
    pub price_per_night: f64,
    pub status: VisibilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub accommodation_id: i64,
    pub name: String,
    pub description: String,
    pub max_occupancy: i32,
    pub room_count: i32,
    pub price_per_night: f64,
}
