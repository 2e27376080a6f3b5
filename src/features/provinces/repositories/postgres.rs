use async_trait::async_trait;
use sqlx::PgPool;

use super::ProvinceRepository;
use crate::core::error::{AppError, Result};
use crate::features::provinces::models::Province;

pub struct PgProvinceRepository {
    pool: PgPool,
}

impl PgProvinceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProvinceRepository for PgProvinceRepository {
    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM provinces WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check province name: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, name: &str) -> Result<Province> {
        sqlx::query_as::<_, Province>(
            r#"
            INSERT INTO provinces (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "There is an existing province for given name!"))
    }

    async fn find_all(&self) -> Result<Vec<Province>> {
        sqlx::query_as::<_, Province>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM provinces
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch provinces: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Province>> {
        sqlx::query_as::<_, Province>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM provinces
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch province {}: {:?}", id, e);
            AppError::Database(e)
        })
    }
}
