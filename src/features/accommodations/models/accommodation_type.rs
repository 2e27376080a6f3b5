use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Category of lodging, e.g. hotel, villa, guest house
#[derive(Debug, Clone, FromRow)]
pub struct AccommodationType {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
