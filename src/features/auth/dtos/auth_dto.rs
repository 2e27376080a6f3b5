use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::auth::model::UserStatus;

/// Form body of `POST /oauth/token`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TokenRequestForm {
    pub grant_type: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub refresh_token: Option<String>,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,
    /// Client credentials, when not sent as HTTP Basic
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Form body of `POST /oauth/authorize`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AuthorizeForm {
    /// `code` or `token`
    pub response_type: String,
    pub client_id: String,
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,
    pub state: Option<String>,
    pub username: String,
    pub password: String,
}

/// Successful token response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponseDto {
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub scope: String,
    pub jti: String,
    pub user_id: i64,
    pub username: String,
    pub status: UserStatus,
}
