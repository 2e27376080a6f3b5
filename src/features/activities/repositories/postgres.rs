use async_trait::async_trait;
use sqlx::PgPool;

use super::ActivityRepository;
use crate::core::error::{AppError, Result};
use crate::features::activities::models::Activity;
use crate::shared::visibility::VisibilityStatus;

pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM activities WHERE activity_name = $1)",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check activity name: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, name: &str, image: Option<&[u8]>) -> Result<Activity> {
        sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (activity_name, image, visibility_status)
            VALUES ($1, $2, 'VISIBLE')
            RETURNING id, activity_name, visibility_status, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "There is an existing activity for given name!"))
    }

    async fn find_all(&self) -> Result<Vec<Activity>> {
        sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, activity_name, visibility_status, created_at, updated_at
            FROM activities
            ORDER BY activity_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch activities: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_visibility(&self, status: VisibilityStatus) -> Result<Vec<Activity>> {
        sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, activity_name, visibility_status, created_at, updated_at
            FROM activities
            WHERE visibility_status = $1
            ORDER BY activity_name ASC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch {} activities: {:?}", status, e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Activity>> {
        sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, activity_name, visibility_status, created_at, updated_at
            FROM activities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch activity {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn toggle_visibility(&self, id: i64) -> Result<Option<VisibilityStatus>> {
        sqlx::query_scalar::<_, VisibilityStatus>(
            r#"
            UPDATE activities
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
            tracing::error!("Failed to toggle activity {} visibility: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn find_image(&self, id: i64) -> Result<Option<Vec<u8>>> {
        let image = sqlx::query_scalar::<_, Option<Vec<u8>>>(
            "SELECT image FROM activities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch activity {} image: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(image.flatten())
    }
}
