//! Accommodation and accommodation type persistence.

mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::accommodations::models::{
    Accommodation, AccommodationType, NewAccommodation, NewRoom, Room,
};
use crate::shared::visibility::VisibilityStatus;

pub use postgres::{PgAccommodationRepository, PgAccommodationTypeRepository};

#[async_trait]
pub trait AccommodationTypeRepository: Send + Sync {
    async fn exists_by_name(&self, name: &str) -> Result<bool>;

    async fn insert(&self, name: &str) -> Result<AccommodationType>;

    async fn find_all(&self) -> Result<Vec<AccommodationType>>;
}

#[async_trait]
pub trait AccommodationRepository: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn AccommodationUnitOfWork>>;

    async fn find_all(&self) -> Result<Vec<Accommodation>>;

    async fn find_by_vendor(&self, vendor_id: i64) -> Result<Vec<Accommodation>>;

    /// `None` unless the accommodation exists and belongs to the vendor
    async fn find_for_vendor(&self, id: i64, vendor_id: i64) -> Result<Option<Accommodation>>;

    /// Flip the status of a vendor-owned accommodation; `None` when not owned or absent
    async fn toggle_status_for_vendor(
        &self,
        id: i64,
        vendor_id: i64,
    ) -> Result<Option<VisibilityStatus>>;

    async fn find_picture_ids(&self, accommodation_id: i64) -> Result<Vec<i64>>;

    async fn find_picture(&self, picture_id: i64) -> Result<Option<Vec<u8>>>;

    async fn room_exists_by_name(&self, accommodation_id: i64, name: &str) -> Result<bool>;

    async fn insert_room(&self, room: &NewRoom) -> Result<Room>;

    async fn find_rooms(&self, accommodation_id: i64) -> Result<Vec<Room>>;

    async fn count_rooms(&self, accommodation_id: i64) -> Result<i64>;
}

/// Transaction-scoped accommodation writes
#[async_trait]
pub trait AccommodationUnitOfWork: Send {
    async fn accommodation_type_exists(&mut self, type_id: i64) -> Result<bool>;

    async fn location_exists(&mut self, location_id: i64) -> Result<bool>;

    async fn insert_accommodation(&mut self, accommodation: &NewAccommodation)
        -> Result<Accommodation>;

    async fn insert_picture(&mut self, accommodation_id: i64, image: &[u8]) -> Result<i64>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
