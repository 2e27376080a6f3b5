use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::{
    LocationAttractionDto, SaveLocationAttractionDto, UpdateLocationAttractionDto,
};
use crate::features::locations::models::LocationAttraction;
use crate::features::locations::repositories::AttractionRepository;
use crate::shared::constants::LOCATION_ATTRACTION_IMAGE_BASE_URL;
use crate::shared::images::{decode_pictures, ImageUrls};
use crate::shared::visibility::VisibilityChangeDto;

/// Service for attractions inside a location
pub struct AttractionService {
    attractions: Arc<dyn AttractionRepository>,
    image_urls: ImageUrls,
}

impl AttractionService {
    pub fn new(attractions: Arc<dyn AttractionRepository>, image_urls: ImageUrls) -> Self {
        Self {
            attractions,
            image_urls,
        }
    }

    /// Create an attraction with its pictures in one transaction
    pub async fn create_attraction(
        &self,
        dto: SaveLocationAttractionDto,
    ) -> Result<LocationAttractionDto> {
        let pictures = decode_pictures(&dto.location_attraction_pictures)?;
        let new_attraction = dto.to_new_attraction();

        let mut uow = self.attractions.begin().await?;

        if uow
            .attraction_name_taken(&new_attraction.name, None)
            .await?
        {
            return Err(AppError::Conflict(
                "There is an existing location attraction for given name!".to_string(),
            ));
        }

        if !uow.location_exists(new_attraction.location_id).await? {
            return Err(AppError::NotFound("Location not found".to_string()));
        }

        let attraction = uow.insert_attraction(&new_attraction).await?;

        let mut picture_ids = Vec::with_capacity(pictures.len());
        for picture in &pictures {
            picture_ids.push(uow.insert_picture(attraction.id, picture).await?);
        }

        uow.commit().await?;

        tracing::info!(
            "Location attraction created: id={}, name={}, location_id={}, pictures={}",
            attraction.id,
            attraction.name,
            attraction.location_id,
            picture_ids.len()
        );

        Ok(self.to_dto(attraction, &picture_ids))
    }

    /// Replace an attraction's fields and append any new pictures
    pub async fn update_attraction(
        &self,
        dto: UpdateLocationAttractionDto,
    ) -> Result<LocationAttractionDto> {
        let pictures = decode_pictures(&dto.attraction.location_attraction_pictures)?;
        let changes = dto.attraction.to_new_attraction();

        let mut uow = self.attractions.begin().await?;

        if !uow.lock_attraction(dto.id).await? {
            return Err(AppError::NotFound(
                "Location attraction not found".to_string(),
            ));
        }

        if uow
            .attraction_name_taken(&changes.name, Some(dto.id))
            .await?
        {
            return Err(AppError::Conflict(
                "There is an existing location attraction for given name!".to_string(),
            ));
        }

        if !uow.location_exists(changes.location_id).await? {
            return Err(AppError::NotFound("Location not found".to_string()));
        }

        let attraction = uow.update_attraction(dto.id, &changes).await?;
        for picture in &pictures {
            uow.insert_picture(attraction.id, picture).await?;
        }

        uow.commit().await?;
        tracing::info!("Location attraction updated: id={}", attraction.id);

        self.assemble(attraction).await
    }

    pub async fn change_attraction_status(&self, id: i64) -> Result<VisibilityChangeDto> {
        let visibility_status = self
            .attractions
            .toggle_visibility(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Location attraction not found".to_string()))?;

        tracing::info!(
            "Location attraction {} visibility changed to {}",
            id,
            visibility_status
        );
        Ok(VisibilityChangeDto {
            id,
            visibility_status,
        })
    }

    pub async fn get_attraction_by_id(&self, id: i64) -> Result<LocationAttractionDto> {
        let attraction = self
            .attractions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Location attraction not found".to_string()))?;

        self.assemble(attraction).await
    }

    /// Attractions whose name contains `text`, ignoring case
    pub async fn search_attractions(&self, text: Option<&str>) -> Result<Vec<LocationAttractionDto>> {
        let attractions = self.attractions.search_by_name(text).await?;
        tracing::debug!(
            "Attraction search {:?} matched {} rows",
            text,
            attractions.len()
        );
        self.assemble_all(attractions).await
    }

    pub async fn attractions_for_location(
        &self,
        location_id: i64,
    ) -> Result<Vec<LocationAttractionDto>> {
        let attractions = self.attractions.find_by_location(location_id).await?;
        self.assemble_all(attractions).await
    }

    pub async fn count_for_location(&self, location_id: i64) -> Result<i64> {
        self.attractions.count_by_location(location_id).await
    }

    async fn assemble_all(
        &self,
        attractions: Vec<LocationAttraction>,
    ) -> Result<Vec<LocationAttractionDto>> {
        let mut dtos = Vec::with_capacity(attractions.len());
        for attraction in attractions {
            dtos.push(self.assemble(attraction).await?);
        }
        Ok(dtos)
    }

    async fn assemble(&self, attraction: LocationAttraction) -> Result<LocationAttractionDto> {
        let picture_ids = self.attractions.find_picture_ids(attraction.id).await?;
        Ok(self.to_dto(attraction, &picture_ids))
    }

    fn to_dto(&self, attraction: LocationAttraction, picture_ids: &[i64]) -> LocationAttractionDto {
        LocationAttractionDto {
            id: attraction.id,
            name: attraction.name,
            description: attraction.description,
            telephone: attraction.telephone,
            email: attraction.email,
            website: attraction.website,
            visibility_status: attraction.visibility_status,
            location_id: attraction.location_id,
            location_attraction_pictures: self
                .image_urls
                .urls(LOCATION_ATTRACTION_IMAGE_BASE_URL, picture_ids),
        }
    }
}
