use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Publication flag shared by every content entity; toggling it is the soft-delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "visibility_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityStatus {
    #[default]
    Visible,
    NotVisible,
}

impl VisibilityStatus {
    /// The only transition: VISIBLE <-> NOT_VISIBLE
    pub fn toggled(self) -> Self {
        match self {
            VisibilityStatus::Visible => VisibilityStatus::NotVisible,
            VisibilityStatus::NotVisible => VisibilityStatus::Visible,
        }
    }
}

/// Response DTO for visibility toggles
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityChangeDto {
    pub id: i64,
    pub visibility_status: VisibilityStatus,
}

impl std::fmt::Display for VisibilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisibilityStatus::Visible => write!(f, "VISIBLE"),
            VisibilityStatus::NotVisible => write!(f, "NOT_VISIBLE"),
        }
    }
}
