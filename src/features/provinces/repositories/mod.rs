//! Province persistence.

mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::provinces::models::Province;

pub use postgres::PgProvinceRepository;

#[async_trait]
pub trait ProvinceRepository: Send + Sync {
    async fn exists_by_name(&self, name: &str) -> Result<bool>;

    async fn insert(&self, name: &str) -> Result<Province>;

    async fn find_all(&self) -> Result<Vec<Province>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Province>>;
}
