use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform response envelope: every endpoint answers with a success flag and
/// either a payload or an error message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

impl ApiResponse<()> {
    /// Envelope for mutations that only report an outcome message
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(None, Some(message.into()), None)
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Envelope for list endpoints, with the item count in `meta.total`
    pub fn list(items: Vec<T>) -> Self {
        let total = items.len() as i64;
        Self::success(Some(items), None, Some(Meta { total }))
    }
}
