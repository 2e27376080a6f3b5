use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Business profile attached to a VENDOR account
#[derive(Debug, Clone, FromRow)]
pub struct Vendor {
    pub id: i64,
    pub account_id: i64,
    pub business_name: String,
    pub email: String,
    pub telephone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVendor {
    pub account_id: i64,
    pub business_name: String,
    pub email: String,
    pub telephone: Option<String>,
    pub address: Option<String>,
}
