//! Location and attraction persistence.
//!
//! Multi-row writes go through a unit of work obtained from `begin()`: every
//! statement runs in one transaction, `commit` persists it, and dropping the
//! unit of work without committing rolls everything back.

mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::locations::models::{
    Location, LocationAttraction, NewLocation, NewLocationAttraction,
};
use crate::shared::visibility::VisibilityStatus;

pub use postgres::{PgAttractionRepository, PgLocationRepository};

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn LocationUnitOfWork>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>>;

    /// Locations whose name contains `name_filter` case-insensitively; all when `None`
    async fn find_all(&self, name_filter: Option<&str>) -> Result<Vec<Location>>;

    /// Flip visibility; `None` when the location does not exist
    async fn toggle_visibility(&self, id: i64) -> Result<Option<VisibilityStatus>>;

    async fn find_picture_ids(&self, location_id: i64) -> Result<Vec<i64>>;

    async fn find_picture(&self, picture_id: i64) -> Result<Option<Vec<u8>>>;

    async fn count_activities(&self, location_id: i64) -> Result<i64>;

    async fn find_linked_activity_ids(&self, location_id: i64) -> Result<Vec<i64>>;
}

/// Transaction-scoped location writes
#[async_trait]
pub trait LocationUnitOfWork: Send {
    /// Whether another location already uses `name`
    async fn location_name_taken(&mut self, name: &str, exclude_id: Option<i64>) -> Result<bool>;

    /// Lock the location row for the rest of the transaction; false when absent
    async fn lock_location(&mut self, id: i64) -> Result<bool>;

    async fn province_exists(&mut self, province_id: i64) -> Result<bool>;

    async fn activity_exists(&mut self, activity_id: i64) -> Result<bool>;

    async fn insert_location(&mut self, location: &NewLocation) -> Result<Location>;

    async fn update_location(&mut self, id: i64, location: &NewLocation) -> Result<Location>;

    async fn insert_picture(&mut self, location_id: i64, image: &[u8]) -> Result<i64>;

    async fn link_activity(&mut self, location_id: i64, activity_id: i64) -> Result<()>;

    async fn unlink_activities(&mut self, location_id: i64) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;
}

#[async_trait]
pub trait AttractionRepository: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn AttractionUnitOfWork>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<LocationAttraction>>;

    async fn find_by_location(&self, location_id: i64) -> Result<Vec<LocationAttraction>>;

    /// Attractions whose name contains `text` case-insensitively; all when `None`
    async fn search_by_name(&self, text: Option<&str>) -> Result<Vec<LocationAttraction>>;

    async fn count_by_location(&self, location_id: i64) -> Result<i64>;

    async fn toggle_visibility(&self, id: i64) -> Result<Option<VisibilityStatus>>;

    async fn find_picture_ids(&self, attraction_id: i64) -> Result<Vec<i64>>;

    async fn find_picture(&self, picture_id: i64) -> Result<Option<Vec<u8>>>;
}

/// Transaction-scoped attraction writes
#[async_trait]
pub trait AttractionUnitOfWork: Send {
    async fn attraction_name_taken(&mut self, name: &str, exclude_id: Option<i64>)
        -> Result<bool>;

    async fn lock_attraction(&mut self, id: i64) -> Result<bool>;

    async fn location_exists(&mut self, location_id: i64) -> Result<bool>;

    async fn insert_attraction(
        &mut self,
        attraction: &NewLocationAttraction,
    ) -> Result<LocationAttraction>;

    async fn update_attraction(
        &mut self,
        id: i64,
        attraction: &NewLocationAttraction,
    ) -> Result<LocationAttraction>;

    async fn insert_picture(&mut self, attraction_id: i64, image: &[u8]) -> Result<i64>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
