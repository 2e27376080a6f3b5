use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::activities::dtos::{ActivityDto, SaveActivityDto};
use crate::features::activities::models::Activity;
use crate::features::activities::repositories::ActivityRepository;
use crate::shared::constants::ACTIVITY_IMAGE_BASE_URL;
use crate::shared::images::{decode_base64_image, ImageUrls};
use crate::shared::visibility::VisibilityChangeDto;

/// Service for the activity catalog
pub struct ActivityService {
    activities: Arc<dyn ActivityRepository>,
    image_urls: ImageUrls,
}

impl ActivityService {
    pub fn new(activities: Arc<dyn ActivityRepository>, image_urls: ImageUrls) -> Self {
        Self {
            activities,
            image_urls,
        }
    }

    pub async fn save_activity(&self, dto: SaveActivityDto) -> Result<ActivityDto> {
        let name = dto.activity_name.trim();

        if self.activities.exists_by_name(name).await? {
            return Err(AppError::Conflict(
                "There is an existing activity for given name!".to_string(),
            ));
        }

        let image = dto
            .image
            .as_deref()
            .map(decode_base64_image)
            .transpose()?;

        let activity = self.activities.insert(name, image.as_deref()).await?;
        tracing::info!(
            "Activity created: id={}, name={}",
            activity.id,
            activity.activity_name
        );

        Ok(self.to_dto(activity))
    }

    pub async fn get_all_activities(&self) -> Result<Vec<ActivityDto>> {
        let activities = self.activities.find_all().await?;
        Ok(activities.into_iter().map(|a| self.to_dto(a)).collect())
    }

    pub async fn get_activity_by_id(&self, id: i64) -> Result<ActivityDto> {
        self.activities
            .find_by_id(id)
            .await?
            .map(|a| self.to_dto(a))
            .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))
    }

    pub async fn change_activity_status(&self, id: i64) -> Result<VisibilityChangeDto> {
        let visibility_status = self
            .activities
            .toggle_visibility(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

        tracing::info!("Activity {} visibility changed to {}", id, visibility_status);
        Ok(VisibilityChangeDto {
            id,
            visibility_status,
        })
    }

    fn to_dto(&self, activity: Activity) -> ActivityDto {
        ActivityDto {
            id: activity.id,
            image: self.image_urls.url(ACTIVITY_IMAGE_BASE_URL, activity.id),
            activity_name: activity.activity_name,
            visibility_status: activity.visibility_status,
        }
    }
}
