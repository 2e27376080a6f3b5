use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::shared::visibility::VisibilityStatus;

/// Database model for a point of interest inside a location
#[derive(Debug, Clone, FromRow)]
pub struct LocationAttraction {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub visibility_status: VisibilityStatus,
    pub location_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating or replacing an attraction's own fields
#[derive(Debug, Clone)]
pub struct NewLocationAttraction {
    pub name: String,
    pub description: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub location_id: i64,
}
