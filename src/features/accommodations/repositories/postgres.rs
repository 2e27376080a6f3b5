use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::{AccommodationRepository, AccommodationTypeRepository, AccommodationUnitOfWork};
use crate::core::error::{AppError, Result};
use crate::features::accommodations::models::{
    Accommodation, AccommodationType, NewAccommodation, NewRoom, Room,
};
use crate::shared::visibility::VisibilityStatus;

const ACCOMMODATION_COLUMNS: &str = "id, name, description, telephone, email, address_line1, \
     address_line2, city, province, postal_code, latitude, longitude, check_in_time, \
     check_out_time, parking, smoking, pets, rating, rating_count, status, location_id, \
     vendor_id, accommodation_type_id, created_at, updated_at";

const ROOM_COLUMNS: &str = "id, accommodation_id, name, description, max_occupancy, room_count, \
     price_per_night, status, created_at, updated_at";

// =============================================================================
// Accommodation types
// =============================================================================

pub struct PgAccommodationTypeRepository {
    pool: PgPool,
}

impl PgAccommodationTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccommodationTypeRepository for PgAccommodationTypeRepository {
    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accommodation_types WHERE name = $1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check accommodation type name: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, name: &str) -> Result<AccommodationType> {
        sqlx::query_as::<_, AccommodationType>(
            r#"
            INSERT INTO accommodation_types (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_write(e, "There is an existing accommodation type for given name!")
        })
    }

    async fn find_all(&self) -> Result<Vec<AccommodationType>> {
        sqlx::query_as::<_, AccommodationType>(
            "SELECT id, name, created_at, updated_at FROM accommodation_types ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch accommodation types: {:?}", e);
            AppError::Database(e)
        })
    }
}

// =============================================================================
// Accommodations
// =============================================================================

pub struct PgAccommodationRepository {
    pool: PgPool,
}

impl PgAccommodationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccommodationRepository for PgAccommodationRepository {
    async fn begin(&self) -> Result<Box<dyn AccommodationUnitOfWork>> {
        let tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;
        Ok(Box::new(PgAccommodationUnitOfWork { tx }))
    }

    async fn find_all(&self) -> Result<Vec<Accommodation>> {
        sqlx::query_as::<_, Accommodation>(&format!(
            "SELECT {} FROM accommodations ORDER BY name ASC",
            ACCOMMODATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch accommodations: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_vendor(&self, vendor_id: i64) -> Result<Vec<Accommodation>> {
        sqlx::query_as::<_, Accommodation>(&format!(
            "SELECT {} FROM accommodations WHERE vendor_id = $1 ORDER BY name ASC",
            ACCOMMODATION_COLUMNS
        ))
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch accommodations of vendor {}: {:?}", vendor_id, e);
            AppError::Database(e)
        })
    }

    async fn find_for_vendor(&self, id: i64, vendor_id: i64) -> Result<Option<Accommodation>> {
        sqlx::query_as::<_, Accommodation>(&format!(
            "SELECT {} FROM accommodations WHERE id = $1 AND vendor_id = $2",
            ACCOMMODATION_COLUMNS
        ))
        .bind(id)
        .bind(vendor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch accommodation {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn toggle_status_for_vendor(
        &self,
        id: i64,
        vendor_id: i64,
    ) -> Result<Option<VisibilityStatus>> {
        sqlx::query_scalar::<_, VisibilityStatus>(
            r#"
            UPDATE accommodations
            SET status = CASE status
                WHEN 'VISIBLE' THEN 'NOT_VISIBLE'::visibility_status
                ELSE 'VISIBLE'::visibility_status
            END
            WHERE id = $1 AND vendor_id = $2
            RETURNING status
            "#,
        )
        .bind(id)
        .bind(vendor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to toggle accommodation {} status: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn find_picture_ids(&self, accommodation_id: i64) -> Result<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT id FROM accommodation_pictures WHERE accommodation_id = $1 ORDER BY id ASC",
        )
        .bind(accommodation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to fetch pictures of accommodation {}: {:?}",
                accommodation_id,
                e
            );
            AppError::Database(e)
        })
    }

    async fn find_picture(&self, picture_id: i64) -> Result<Option<Vec<u8>>> {
        sqlx::query_scalar::<_, Vec<u8>>("SELECT image FROM accommodation_pictures WHERE id = $1")
            .bind(picture_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch accommodation picture {}: {:?}", picture_id, e);
                AppError::Database(e)
            })
    }

    async fn room_exists_by_name(&self, accommodation_id: i64, name: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM rooms WHERE accommodation_id = $1 AND name = $2)",
        )
        .bind(accommodation_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check room name: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert_room(&self, room: &NewRoom) -> Result<Room> {
        let sql = format!(
            r#"
            INSERT INTO rooms
                (accommodation_id, name, description, max_occupancy, room_count, price_per_night)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            ROOM_COLUMNS
        );

        sqlx::query_as::<_, Room>(&sql)
            .bind(room.accommodation_id)
            .bind(&room.name)
            .bind(&room.description)
            .bind(room.max_occupancy)
            .bind(room.room_count)
            .bind(room.price_per_night)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_write(e, "There is an existing room for given name!"))
    }

    async fn find_rooms(&self, accommodation_id: i64) -> Result<Vec<Room>> {
        sqlx::query_as::<_, Room>(&format!(
            "SELECT {} FROM rooms WHERE accommodation_id = $1 ORDER BY name ASC",
            ROOM_COLUMNS
        ))
        .bind(accommodation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to fetch rooms of accommodation {}: {:?}",
                accommodation_id,
                e
            );
            AppError::Database(e)
        })
    }

    async fn count_rooms(&self, accommodation_id: i64) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms WHERE accommodation_id = $1")
            .bind(accommodation_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to count rooms of accommodation {}: {:?}",
                    accommodation_id,
                    e
                );
                AppError::Database(e)
            })
    }
}

pub struct PgAccommodationUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AccommodationUnitOfWork for PgAccommodationUnitOfWork {
    async fn accommodation_type_exists(&mut self, type_id: i64) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accommodation_types WHERE id = $1)",
        )
        .bind(type_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check accommodation type {}: {:?}", type_id, e);
            AppError::Database(e)
        })
    }

    async fn location_exists(&mut self, location_id: i64) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1)")
            .bind(location_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check location {}: {:?}", location_id, e);
                AppError::Database(e)
            })
    }

    async fn insert_accommodation(
        &mut self,
        accommodation: &NewAccommodation,
    ) -> Result<Accommodation> {
        let sql = format!(
            r#"
            INSERT INTO accommodations
                (name, description, telephone, email, address_line1, address_line2, city,
                 province, postal_code, latitude, longitude, check_in_time, check_out_time,
                 parking, smoking, pets, location_id, vendor_id, accommodation_type_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING {}
            "#,
            ACCOMMODATION_COLUMNS
        );

        sqlx::query_as::<_, Accommodation>(&sql)
            .bind(&accommodation.name)
            .bind(&accommodation.description)
            .bind(&accommodation.telephone)
            .bind(&accommodation.email)
            .bind(&accommodation.address_line1)
            .bind(&accommodation.address_line2)
            .bind(&accommodation.city)
            .bind(&accommodation.province)
            .bind(&accommodation.postal_code)
            .bind(accommodation.latitude)
            .bind(accommodation.longitude)
            .bind(accommodation.check_in_time)
            .bind(accommodation.check_out_time)
            .bind(accommodation.parking)
            .bind(accommodation.smoking)
            .bind(accommodation.pets)
            .bind(accommodation.location_id)
            .bind(accommodation.vendor_id)
            .bind(accommodation.accommodation_type_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert accommodation: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn insert_picture(&mut self, accommodation_id: i64, image: &[u8]) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO accommodation_pictures (accommodation_id, image) VALUES ($1, $2) RETURNING id",
        )
        .bind(accommodation_id)
        .bind(image)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert accommodation picture: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit transaction: {:?}", e);
            AppError::Database(e)
        })
    }
}
