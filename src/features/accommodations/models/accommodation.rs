use chrono::{DateTime, NaiveTime, Utc};
use sqlx::FromRow;

use crate::shared::visibility::VisibilityStatus;

/// Database model for a vendor-owned lodging near a location
#[derive(Debug, Clone, FromRow)]
pub struct Accommodation {
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
    pub check_in_time: NaiveTime,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccommodation {
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
    pub check_in_time: NaiveTime,
    pub check_out_time: NaiveTime,
    pub parking: bool,
    pub smoking: bool,
    pub pets: bool,
    pub location_id: i64,
    pub vendor_id: i64,
    pub accommodation_type_id: i64,
}
