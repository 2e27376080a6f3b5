use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::shared::visibility::VisibilityStatus;

/// Database model for a travel destination.
///
/// Pictures, activity links and attractions reference the location by id and are
/// loaded through their own repository queries.
#[derive(Debug, Clone, FromRow)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub minimum_spending_days: i32,
    pub visibility_status: VisibilityStatus,
    pub province_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating or replacing a location's own fields
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub minimum_spending_days: i32,
    pub province_id: i64,
}
