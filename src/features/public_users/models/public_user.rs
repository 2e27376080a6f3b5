use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "gender", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Database model for a public user's profile; credentials live in `user_accounts`
#[derive(Debug, Clone, FromRow)]
pub struct PublicUser {
    pub id: i64,
    pub account_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub nationality: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub town: Option<String>,
    pub zipcode: Option<String>,
    pub verification_code: Option<String>,
    pub verification_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPublicUser {
    pub account_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub verification_code: String,
    pub verification_expires_at: DateTime<Utc>,
}

/// Editable profile fields
#[derive(Debug, Clone, Default)]
pub struct PublicUserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub mobile: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub nationality: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub town: Option<String>,
    pub zipcode: Option<String>,
}
