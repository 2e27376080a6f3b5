//! Activity catalog persistence.

mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::activities::models::Activity;
use crate::shared::visibility::VisibilityStatus;

pub use postgres::PgActivityRepository;

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn exists_by_name(&self, name: &str) -> Result<bool>;

    async fn insert(&self, name: &str, image: Option<&[u8]>) -> Result<Activity>;

    async fn find_all(&self) -> Result<Vec<Activity>>;

    async fn find_by_visibility(&self, status: VisibilityStatus) -> Result<Vec<Activity>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Activity>>;

    /// Flip visibility; `None` when the activity does not exist
    async fn toggle_visibility(&self, id: i64) -> Result<Option<VisibilityStatus>>;

    /// Image bytes; `None` when the activity or its image is missing
    async fn find_image(&self, id: i64) -> Result<Option<Vec<u8>>>;
}
