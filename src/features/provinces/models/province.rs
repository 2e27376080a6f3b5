use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Administrative region that groups locations
#[derive(Debug, Clone, FromRow)]
pub struct Province {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
