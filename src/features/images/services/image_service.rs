use std::str::FromStr;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::accommodations::repositories::AccommodationRepository;
use crate::features::activities::repositories::ActivityRepository;
use crate::features::locations::repositories::{AttractionRepository, LocationRepository};

/// Owner of a stored picture, as it appears in the URL path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Location,
    LocationAttraction,
    Activity,
    Accommodation,
}

impl FromStr for ImageKind {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "location" => Ok(ImageKind::Location),
            "location-attraction" => Ok(ImageKind::LocationAttraction),
            "activity" => Ok(ImageKind::Activity),
            "accommodation" => Ok(ImageKind::Accommodation),
            other => Err(AppError::NotFound(format!("Unknown image kind: {}", other))),
        }
    }
}

/// Looks up picture bytes across every feature that stores them
pub struct ImageService {
    locations: Arc<dyn LocationRepository>,
    attractions: Arc<dyn AttractionRepository>,
    activities: Arc<dyn ActivityRepository>,
    accommodations: Arc<dyn AccommodationRepository>,
}

impl ImageService {
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        attractions: Arc<dyn AttractionRepository>,
        activities: Arc<dyn ActivityRepository>,
        accommodations: Arc<dyn AccommodationRepository>,
    ) -> Self {
        Self {
            locations,
            attractions,
            activities,
            accommodations,
        }
    }

    /// Picture bytes; activity images are keyed by activity id, the rest by picture id
    pub async fn get_image(&self, kind: ImageKind, id: i64) -> Result<Vec<u8>> {
        let image = match kind {
            ImageKind::Location => self.locations.find_picture(id).await?,
            ImageKind::LocationAttraction => self.attractions.find_picture(id).await?,
            ImageKind::Activity => self.activities.find_image(id).await?,
            ImageKind::Accommodation => self.accommodations.find_picture(id).await?,
        };

        image.ok_or_else(|| AppError::NotFound("Image not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryStore;
    use crate::shared::visibility::VisibilityStatus;

    fn service(store: &InMemoryStore) -> ImageService {
        ImageService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        )
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(
            "location-attraction".parse::<ImageKind>().unwrap(),
            ImageKind::LocationAttraction
        );
        assert!(matches!(
            "province".parse::<ImageKind>(),
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_activity_image_by_activity_id() {
        let store = InMemoryStore::new();
        let activity = store.seed_activity("Surfing", VisibilityStatus::Visible);
        let service = service(&store);

        let image = service
            .get_image(ImageKind::Activity, activity.id)
            .await
            .unwrap();
        assert_eq!(Some(image), store.activity_image(activity.id));
    }

    #[tokio::test]
    async fn test_missing_picture_is_not_found() {
        let store = InMemoryStore::new();
        let service = service(&store);

        for kind in [
            ImageKind::Location,
            ImageKind::LocationAttraction,
            ImageKind::Activity,
            ImageKind::Accommodation,
        ] {
            assert!(matches!(
                service.get_image(kind, 42).await,
                Err(AppError::NotFound(_))
            ));
        }
    }
}
