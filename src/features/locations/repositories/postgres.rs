use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::{AttractionRepository, AttractionUnitOfWork, LocationRepository, LocationUnitOfWork};
use crate::core::database::contains_pattern;
use crate::core::error::{AppError, Result};
use crate::features::locations::models::{
    Location, LocationAttraction, NewLocation, NewLocationAttraction,
};
use crate::shared::visibility::VisibilityStatus;

const LOCATION_COLUMNS: &str = "id, name, latitude, longitude, description, minimum_spending_days, \
     visibility_status, province_id, created_at, updated_at";

const ATTRACTION_COLUMNS: &str = "id, name, description, telephone, email, website, \
     visibility_status, location_id, created_at, updated_at";

const LOCATION_CONFLICT: &str = "There is an existing location for given name!";
const ATTRACTION_CONFLICT: &str = "There is an existing location attraction for given name!";

async fn begin_transaction(pool: &PgPool) -> Result<Transaction<'static, Postgres>> {
    pool.begin().await.map_err(|e| {
        tracing::error!("Failed to begin transaction: {:?}", e);
        AppError::Database(e)
    })
}

async fn commit_transaction(tx: Transaction<'static, Postgres>) -> Result<()> {
    tx.commit().await.map_err(|e| {
        tracing::error!("Failed to commit transaction: {:?}", e);
        AppError::Database(e)
    })
}

// =============================================================================
// Locations
// =============================================================================

pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn begin(&self) -> Result<Box<dyn LocationUnitOfWork>> {
        let tx = begin_transaction(&self.pool).await?;
        Ok(Box::new(PgLocationUnitOfWork { tx }))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Location>> {
        sqlx::query_as::<_, Location>(&format!(
            "SELECT {} FROM locations WHERE id = $1",
            LOCATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch location {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn find_all(&self, name_filter: Option<&str>) -> Result<Vec<Location>> {
        let sql = format!(
            "SELECT {} FROM locations WHERE ($1::TEXT IS NULL OR LOWER(name) LIKE $1) ORDER BY name ASC",
            LOCATION_COLUMNS
        );

        sqlx::query_as::<_, Location>(&sql)
            .bind(name_filter.map(contains_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch locations: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn toggle_visibility(&self, id: i64) -> Result<Option<VisibilityStatus>> {
        sqlx::query_scalar::<_, VisibilityStatus>(
            r#"
            UPDATE locations
            SET visibility_status = CASE visibility_status
                WHEN 'VISIBLE' THEN 'NOT_VISIBLE'::visibility_status
                ELSE 'VISIBLE'::visibility_status
            END
            WHERE id = $1
            RETURNING visibility_status
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to toggle location {} visibility: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn find_picture_ids(&self, location_id: i64) -> Result<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT id FROM location_pictures WHERE location_id = $1 ORDER BY id ASC",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch pictures of location {}: {:?}", location_id, e);
            AppError::Database(e)
        })
    }

    async fn find_picture(&self, picture_id: i64) -> Result<Option<Vec<u8>>> {
        sqlx::query_scalar::<_, Vec<u8>>("SELECT image FROM location_pictures WHERE id = $1")
            .bind(picture_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch location picture {}: {:?}", picture_id, e);
                AppError::Database(e)
            })
    }

    async fn count_activities(&self, location_id: i64) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM activity_location_details WHERE location_id = $1",
        )
        .bind(location_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count activities of location {}: {:?}", location_id, e);
            AppError::Database(e)
        })
    }

    async fn find_linked_activity_ids(&self, location_id: i64) -> Result<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT activity_id FROM activity_location_details WHERE location_id = $1",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch activities of location {}: {:?}", location_id, e);
            AppError::Database(e)
        })
    }
}

pub struct PgLocationUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl LocationUnitOfWork for PgLocationUnitOfWork {
    async fn location_name_taken(&mut self, name: &str, exclude_id: Option<i64>) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM locations
                WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check location name: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn lock_location(&mut self, id: i64) -> Result<bool> {
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM locations WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to lock location {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(locked.is_some())
    }

    async fn province_exists(&mut self, province_id: i64) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM provinces WHERE id = $1)")
            .bind(province_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check province {}: {:?}", province_id, e);
                AppError::Database(e)
            })
    }

    async fn activity_exists(&mut self, activity_id: i64) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM activities WHERE id = $1)")
            .bind(activity_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check activity {}: {:?}", activity_id, e);
                AppError::Database(e)
            })
    }

    async fn insert_location(&mut self, location: &NewLocation) -> Result<Location> {
        sqlx::query_as::<_, Location>(&format!(
            r#"
            INSERT INTO locations
                (name, latitude, longitude, description, minimum_spending_days, visibility_status, province_id)
            VALUES ($1, $2, $3, $4, $5, 'VISIBLE', $6)
            RETURNING {}
            "#,
            LOCATION_COLUMNS
        ))
        .bind(&location.name)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(&location.description)
        .bind(location.minimum_spending_days)
        .bind(location.province_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_write(e, LOCATION_CONFLICT))
    }

    async fn update_location(&mut self, id: i64, location: &NewLocation) -> Result<Location> {
        sqlx::query_as::<_, Location>(&format!(
            r#"
            UPDATE locations
            SET name = $2, latitude = $3, longitude = $4, description = $5,
                minimum_spending_days = $6, province_id = $7
            WHERE id = $1
            RETURNING {}
            "#,
            LOCATION_COLUMNS
        ))
        .bind(id)
        .bind(&location.name)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(&location.description)
        .bind(location.minimum_spending_days)
        .bind(location.province_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_write(e, LOCATION_CONFLICT))
    }

    async fn insert_picture(&mut self, location_id: i64, image: &[u8]) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO location_pictures (location_id, image) VALUES ($1, $2) RETURNING id",
        )
        .bind(location_id)
        .bind(image)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store picture of location {}: {:?}", location_id, e);
            AppError::Database(e)
        })
    }

    async fn link_activity(&mut self, location_id: i64, activity_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_location_details (activity_id, location_id)
            VALUES ($1, $2)
            ON CONFLICT (activity_id, location_id) DO NOTHING
            "#,
        )
        .bind(activity_id)
        .bind(location_id)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to link activity {} to location {}: {:?}",
                activity_id,
                location_id,
                e
            );
            AppError::Database(e)
        })?;

        Ok(())
    }

    async fn unlink_activities(&mut self, location_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM activity_location_details WHERE location_id = $1")
            .bind(location_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to unlink activities of location {}: {:?}", location_id, e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        commit_transaction(self.tx).await
    }
}

// =============================================================================
// Attractions
// =============================================================================

pub struct PgAttractionRepository {
    pool: PgPool,
}

impl PgAttractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttractionRepository for PgAttractionRepository {
    async fn begin(&self) -> Result<Box<dyn AttractionUnitOfWork>> {
        let tx = begin_transaction(&self.pool).await?;
        Ok(Box::new(PgAttractionUnitOfWork { tx }))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LocationAttraction>> {
        sqlx::query_as::<_, LocationAttraction>(&format!(
            "SELECT {} FROM location_attractions WHERE id = $1",
            ATTRACTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch location attraction {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn find_by_location(&self, location_id: i64) -> Result<Vec<LocationAttraction>> {
        sqlx::query_as::<_, LocationAttraction>(&format!(
            "SELECT {} FROM location_attractions WHERE location_id = $1 ORDER BY name ASC",
            ATTRACTION_COLUMNS
        ))
        .bind(location_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch attractions of location {}: {:?}", location_id, e);
            AppError::Database(e)
        })
    }

    async fn search_by_name(&self, text: Option<&str>) -> Result<Vec<LocationAttraction>> {
        let sql = format!(
            "SELECT {} FROM location_attractions \
             WHERE ($1::TEXT IS NULL OR LOWER(name) LIKE $1) ORDER BY name ASC",
            ATTRACTION_COLUMNS
        );

        sqlx::query_as::<_, LocationAttraction>(&sql)
            .bind(text.map(contains_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search location attractions: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn count_by_location(&self, location_id: i64) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM location_attractions WHERE location_id = $1",
        )
        .bind(location_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count attractions of location {}: {:?}", location_id, e);
            AppError::Database(e)
        })
    }

    async fn toggle_visibility(&self, id: i64) -> Result<Option<VisibilityStatus>> {
        sqlx::query_scalar::<_, VisibilityStatus>(
            r#"
            UPDATE location_attractions
            SET visibility_status = CASE visibility_status
                WHEN 'VISIBLE' THEN 'NOT_VISIBLE'::visibility_status
                ELSE 'VISIBLE'::visibility_status
            END
            WHERE id = $1
            RETURNING visibility_status
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to toggle attraction {} visibility: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn find_picture_ids(&self, attraction_id: i64) -> Result<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM location_attraction_pictures
            WHERE location_attraction_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(attraction_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch pictures of attraction {}: {:?}", attraction_id, e);
            AppError::Database(e)
        })
    }

    async fn find_picture(&self, picture_id: i64) -> Result<Option<Vec<u8>>> {
        sqlx::query_scalar::<_, Vec<u8>>(
            "SELECT image FROM location_attraction_pictures WHERE id = $1",
        )
        .bind(picture_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch attraction picture {}: {:?}", picture_id, e);
            AppError::Database(e)
        })
    }
}

pub struct PgAttractionUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AttractionUnitOfWork for PgAttractionUnitOfWork {
    async fn attraction_name_taken(
        &mut self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM location_attractions
                WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check attraction name: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn lock_attraction(&mut self, id: i64) -> Result<bool> {
        let locked = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM location_attractions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to lock attraction {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(locked.is_some())
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

    async fn insert_attraction(
        &mut self,
        attraction: &NewLocationAttraction,
    ) -> Result<LocationAttraction> {
        sqlx::query_as::<_, LocationAttraction>(&format!(
            r#"
            INSERT INTO location_attractions
                (name, description, telephone, email, website, visibility_status, location_id)
            VALUES ($1, $2, $3, $4, $5, 'VISIBLE', $6)
            RETURNING {}
            "#,
            ATTRACTION_COLUMNS
        ))
        .bind(&attraction.name)
        .bind(&attraction.description)
        .bind(&attraction.telephone)
        .bind(&attraction.email)
        .bind(&attraction.website)
        .bind(attraction.location_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_write(e, ATTRACTION_CONFLICT))
    }

    async fn update_attraction(
        &mut self,
        id: i64,
        attraction: &NewLocationAttraction,
    ) -> Result<LocationAttraction> {
        sqlx::query_as::<_, LocationAttraction>(&format!(
            r#"
            UPDATE location_attractions
            SET name = $2, description = $3, telephone = $4, email = $5, website = $6,
                location_id = $7
            WHERE id = $1
            RETURNING {}
            "#,
            ATTRACTION_COLUMNS
        ))
        .bind(id)
        .bind(&attraction.name)
        .bind(&attraction.description)
        .bind(&attraction.telephone)
        .bind(&attraction.email)
        .bind(&attraction.website)
        .bind(attraction.location_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::from_write(e, ATTRACTION_CONFLICT))
    }

    async fn insert_picture(&mut self, attraction_id: i64, image: &[u8]) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO location_attraction_pictures (location_attraction_id, image)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(attraction_id)
        .bind(image)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store picture of attraction {}: {:?}", attraction_id, e);
            AppError::Database(e)
        })
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        commit_transaction(self.tx).await
    }
}
