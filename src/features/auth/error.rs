use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::shared::constants::INVALID_GRANT_MESSAGE;

/// Failures of the OAuth endpoints; all are answered with 401
#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    InvalidClient(String),

    #[error("{0}")]
    UnauthorizedClient(String),

    /// The reason is logged; callers only see the fixed invalid-grant message
    #[error("{0}")]
    InvalidGrant(String),

    #[error("{0}")]
    UnsupportedGrantType(String),

    #[error("{0}")]
    UnsupportedResponseType(String),

    #[error("{0}")]
    InvalidScope(String),

    #[error(transparent)]
    Server(#[from] AppError),
}

impl OAuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            OAuthError::InvalidRequest(_) => "invalid_request",
            OAuthError::InvalidClient(_) => "invalid_client",
            OAuthError::UnauthorizedClient(_) => "unauthorized_client",
            OAuthError::InvalidGrant(_) => "invalid_grant",
            OAuthError::UnsupportedGrantType(_) => "unsupported_grant_type",
            OAuthError::UnsupportedResponseType(_) => "unsupported_response_type",
            OAuthError::InvalidScope(_) => "invalid_scope",
            OAuthError::Server(_) => "server_error",
        }
    }

    /// Message exposed to the caller
    pub fn public_message(&self) -> String {
        match self {
            OAuthError::InvalidGrant(_) => INVALID_GRANT_MESSAGE.to_string(),
            OAuthError::Server(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Body of every OAuth failure
#[derive(Debug, Serialize, ToSchema)]
pub struct OAuthErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        match &self {
            OAuthError::InvalidGrant(reason) => tracing::warn!("Rejected grant: {}", reason),
            OAuthError::Server(e) => tracing::error!("OAuth endpoint failed: {}", e),
            other => tracing::debug!("OAuth request rejected: {}", other),
        }

        let body = OAuthErrorBody {
            success: false,
            error: self.error_code().to_string(),
            message: self.public_message(),
        };

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_grant_uses_fixed_message() {
        let err = OAuthError::InvalidGrant("password mismatch for admin".to_string());
        assert_eq!(err.error_code(), "invalid_grant");
        assert_eq!(err.public_message(), INVALID_GRANT_MESSAGE);
    }

    #[test]
    fn test_other_errors_keep_their_message() {
        let err = OAuthError::UnsupportedGrantType("Unsupported grant type: implicit".to_string());
        assert_eq!(err.public_message(), "Unsupported grant type: implicit");
    }

    #[test]
    fn test_every_error_is_unauthorized() {
        let responses = [
            OAuthError::InvalidClient("Bad client credentials".to_string()).into_response(),
            OAuthError::InvalidGrant("x".to_string()).into_response(),
            OAuthError::Server(AppError::Internal("boom".to_string())).into_response(),
        ];
        for response in responses {
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
