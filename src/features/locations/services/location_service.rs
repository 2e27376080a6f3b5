use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::activities::repositories::ActivityRepository;
use crate::features::locations::dtos::{
    LocationActivityDto, LocationDetailDto, LocationSummaryDto, SaveLocationDto,
    UpdateLocationDto,
};
use crate::features::locations::models::Location;
use crate::features::locations::repositories::{LocationRepository, LocationUnitOfWork};
use crate::features::locations::services::AttractionService;
use crate::features::provinces::repositories::ProvinceRepository;
use crate::shared::constants::{ACTIVITY_IMAGE_BASE_URL, LOCATION_IMAGE_BASE_URL};
use crate::shared::datetime::format_medium;
use crate::shared::images::{decode_pictures, ImageUrls};
use crate::shared::visibility::{VisibilityChangeDto, VisibilityStatus};

/// Service for locations: transactional writes and composite read views
pub struct LocationService {
    locations: Arc<dyn LocationRepository>,
    provinces: Arc<dyn ProvinceRepository>,
    activities: Arc<dyn ActivityRepository>,
    attractions: Arc<AttractionService>,
    image_urls: ImageUrls,
}

impl LocationService {
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        provinces: Arc<dyn ProvinceRepository>,
        activities: Arc<dyn ActivityRepository>,
        attractions: Arc<AttractionService>,
        image_urls: ImageUrls,
    ) -> Self {
        Self {
            locations,
            provinces,
            activities,
            attractions,
            image_urls,
        }
    }

    /// Create a location with its pictures and activity links.
    ///
    /// Every write happens in one unit of work; any failure leaves no rows behind.
    pub async fn create_location(&self, dto: SaveLocationDto) -> Result<LocationDetailDto> {
        let pictures = decode_pictures(&dto.location_pictures)?;
        let new_location = dto.to_new_location();
        let activity_ids = dto.activity_ids();

        let mut uow = self.locations.begin().await?;

        if uow.location_name_taken(&new_location.name, None).await? {
            return Err(AppError::Conflict(
                "There is an existing location for given name!".to_string(),
            ));
        }

        if !uow.province_exists(new_location.province_id).await? {
            return Err(AppError::NotFound("Province not found".to_string()));
        }

        let location = uow.insert_location(&new_location).await?;

        for picture in &pictures {
            uow.insert_picture(location.id, picture).await?;
        }

        link_activities(uow.as_mut(), location.id, &activity_ids).await?;

        uow.commit().await?;

        tracing::info!(
            "Location created: id={}, name={}, pictures={}, activities={}",
            location.id,
            location.name,
            pictures.len(),
            activity_ids.len()
        );

        self.assemble_detail(location).await
    }

    /// Replace a location's fields and activity links; pictures are appended
    pub async fn update_location(&self, dto: UpdateLocationDto) -> Result<LocationDetailDto> {
        let pictures = decode_pictures(&dto.location.location_pictures)?;
        let changes = dto.location.to_new_location();
        let activity_ids = dto.location.activity_ids();

        let mut uow = self.locations.begin().await?;

        if !uow.lock_location(dto.id).await? {
            return Err(AppError::NotFound("Location not found".to_string()));
        }

        if uow.location_name_taken(&changes.name, Some(dto.id)).await? {
            return Err(AppError::Conflict(
                "There is an existing location for given name!".to_string(),
            ));
        }

        if !uow.province_exists(changes.province_id).await? {
            return Err(AppError::NotFound("Province not found".to_string()));
        }

        let location = uow.update_location(dto.id, &changes).await?;

        for picture in &pictures {
            uow.insert_picture(location.id, picture).await?;
        }

        uow.unlink_activities(location.id).await?;
        link_activities(uow.as_mut(), location.id, &activity_ids).await?;

        uow.commit().await?;
        tracing::info!("Location updated: id={}, name={}", location.id, location.name);

        self.assemble_detail(location).await
    }

    pub async fn change_location_status(&self, id: i64) -> Result<VisibilityChangeDto> {
        let visibility_status = self
            .locations
            .toggle_visibility(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Location not found".to_string()))?;

        tracing::info!("Location {} visibility changed to {}", id, visibility_status);
        Ok(VisibilityChangeDto {
            id,
            visibility_status,
        })
    }

    /// Summary view of every location whose name contains `text`, ignoring case
    pub async fn get_all_locations(&self, text: Option<&str>) -> Result<Vec<LocationSummaryDto>> {
        let locations = self.locations.find_all(text).await?;
        let province_names: HashMap<i64, String> = self
            .provinces
            .find_all()
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let mut summaries = Vec::with_capacity(locations.len());
        for location in locations {
            let number_of_activities = self.locations.count_activities(location.id).await?;
            let number_of_attractions = self.attractions.count_for_location(location.id).await?;
            let province_name = province_names
                .get(&location.province_id)
                .cloned()
                .unwrap_or_default();

            summaries.push(LocationSummaryDto {
                id: location.id,
                modified_date_time: format_medium(&location.updated_at),
                name: location.name,
                latitude: location.latitude,
                longitude: location.longitude,
                description: location.description,
                minimum_spending_days: location.minimum_spending_days,
                visibility_status: location.visibility_status,
                province_id: location.province_id,
                province_name,
                number_of_activities,
                number_of_attractions,
            });
        }

        Ok(summaries)
    }

    pub async fn get_location_by_id(&self, id: i64) -> Result<LocationDetailDto> {
        let location = self
            .locations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Location not found".to_string()))?;

        self.assemble_detail(location).await
    }

    async fn assemble_detail(&self, location: Location) -> Result<LocationDetailDto> {
        let province_name = self
            .provinces
            .find_by_id(location.province_id)
            .await?
            .map(|p| p.name)
            .unwrap_or_default();

        let picture_ids = self.locations.find_picture_ids(location.id).await?;
        let linked: HashSet<i64> = self
            .locations
            .find_linked_activity_ids(location.id)
            .await?
            .into_iter()
            .collect();

        let location_activities = self
            .activities
            .find_by_visibility(VisibilityStatus::Visible)
            .await?
            .into_iter()
            .map(|activity| LocationActivityDto {
                id: activity.id,
                image: self.image_urls.url(ACTIVITY_IMAGE_BASE_URL, activity.id),
                selected: linked.contains(&activity.id),
                activity_name: activity.activity_name,
                visibility_status: activity.visibility_status,
            })
            .collect();

        let location_attractions = self.attractions.attractions_for_location(location.id).await?;

        Ok(LocationDetailDto {
            id: location.id,
            modified_date_time: format_medium(&location.updated_at),
            name: location.name,
            latitude: location.latitude,
            longitude: location.longitude,
            description: location.description,
            minimum_spending_days: location.minimum_spending_days,
            visibility_status: location.visibility_status,
            province_id: location.province_id,
            province_name,
            number_of_activities: linked.len() as i64,
            number_of_attractions: location_attractions.len() as i64,
            location_pictures: self.image_urls.urls(LOCATION_IMAGE_BASE_URL, &picture_ids),
            location_activities,
            location_attractions,
        })
    }
}

/// Check and link each activity; the first missing one aborts the unit of work
async fn link_activities(
    uow: &mut dyn LocationUnitOfWork,
    location_id: i64,
    activity_ids: &[i64],
) -> Result<()> {
    for activity_id in activity_ids {
        if !uow.activity_exists(*activity_id).await? {
            return Err(AppError::NotFound(format!(
                "Activity not found: {}",
                activity_id
            )));
        }
        uow.link_activity(location_id, *activity_id).await?;
    }
    Ok(())
}
