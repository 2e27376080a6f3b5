use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::provinces::dtos::{ProvinceDto, SaveProvinceDto};
use crate::features::provinces::repositories::ProvinceRepository;

/// Service for province operations
pub struct ProvinceService {
    provinces: Arc<dyn ProvinceRepository>,
}

impl ProvinceService {
    pub fn new(provinces: Arc<dyn ProvinceRepository>) -> Self {
        Self { provinces }
    }

    /// Save a new province; names are unique
    pub async fn save_province(&self, dto: SaveProvinceDto) -> Result<ProvinceDto> {
        let name = dto.name.trim();

        if self.provinces.exists_by_name(name).await? {
            return Err(AppError::Conflict(
                "There is an existing province for given name!".to_string(),
            ));
        }

        let province = self.provinces.insert(name).await?;
        tracing::info!("Province created: id={}, name={}", province.id, province.name);

        Ok(province.into())
    }

    /// List all provinces ordered by name
    pub async fn get_all_provinces(&self) -> Result<Vec<ProvinceDto>> {
        let provinces = self.provinces.find_all().await?;
        Ok(provinces.into_iter().map(Into::into).collect())
    }
}
