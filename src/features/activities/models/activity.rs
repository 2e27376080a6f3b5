use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::shared::visibility::VisibilityStatus;

/// Activity catalog entry. The image column is fetched separately by id.
#[derive(Debug, Clone, FromRow)]
pub struct Activity {
    pub id: i64,
    pub activity_name: String,
    pub visibility_status: VisibilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
