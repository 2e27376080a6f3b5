mod attraction_dto;
mod location_dto;

pub use attraction_dto::*;
pub use location_dto::*;

use serde::Deserialize;
use utoipa::IntoParams;

/// Query params for name search on list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring of the name; omitted or empty matches everything
    pub text: Option<String>,
}

impl SearchQuery {
    /// Trimmed search text; `None` when absent or blank
    pub fn text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
