use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::accommodations::dtos::{
    AccommodationDto, AccommodationTypeDto, RoomDto, SaveAccommodationDto,
    SaveAccommodationTypeDto, SaveRoomDto,
};
use crate::features::accommodations::models::Accommodation;
use crate::features::accommodations::repositories::{
    AccommodationRepository, AccommodationTypeRepository,
};
use crate::features::vendors::repositories::VendorRepository;
use crate::shared::constants::ACCOMMODATION_IMAGE_BASE_URL;
use crate::shared::images::{decode_pictures, ImageUrls};
use crate::shared::visibility::VisibilityChangeDto;

/// Service for accommodation types (admin) and vendor-owned accommodations
pub struct AccommodationService {
    accommodations: Arc<dyn AccommodationRepository>,
    types: Arc<dyn AccommodationTypeRepository>,
    vendors: Arc<dyn VendorRepository>,
    image_urls: ImageUrls,
}

impl AccommodationService {
    pub fn new(
        accommodations: Arc<dyn AccommodationRepository>,
        types: Arc<dyn AccommodationTypeRepository>,
        vendors: Arc<dyn VendorRepository>,
        image_urls: ImageUrls,
    ) -> Self {
        Self {
            accommodations,
            types,
            vendors,
            image_urls,
        }
    }

    pub async fn save_type(&self, dto: SaveAccommodationTypeDto) -> Result<AccommodationTypeDto> {
        let name = dto.name.trim();

        if self.types.exists_by_name(name).await? {
            return Err(AppError::Conflict(
                "There is an existing accommodation type for given name!".to_string(),
            ));
        }

        let accommodation_type = self.types.insert(name).await?;
        tracing::info!(
            "Accommodation type created: id={}, name={}",
            accommodation_type.id,
            accommodation_type.name
        );

        Ok(accommodation_type.into())
    }

    pub async fn get_all_types(&self) -> Result<Vec<AccommodationTypeDto>> {
        let types = self.types.find_all().await?;
        Ok(types.into_iter().map(Into::into).collect())
    }

    pub async fn get_all_accommodations(&self) -> Result<Vec<AccommodationDto>> {
        let accommodations = self.accommodations.find_all().await?;
        self.assemble_all(accommodations).await
    }

    /// Create an accommodation for the vendor owning `account_id`
    pub async fn create_accommodation(
        &self,
        account_id: i64,
        dto: SaveAccommodationDto,
    ) -> Result<AccommodationDto> {
        let vendor_id = self.vendor_id(account_id).await?;
        let pictures = decode_pictures(&dto.accommodation_pictures)?;
        let new_accommodation = dto.to_new_accommodation(vendor_id);

        let mut uow = self.accommodations.begin().await?;

        if !uow
            .accommodation_type_exists(new_accommodation.accommodation_type_id)
            .await?
        {
            return Err(AppError::NotFound(
                "Accommodation type not found".to_string(),
            ));
        }

        if !uow.location_exists(new_accommodation.location_id).await? {
            return Err(AppError::NotFound("Location not found".to_string()));
        }

        let accommodation = uow.insert_accommodation(&new_accommodation).await?;

        let mut picture_ids = Vec::with_capacity(pictures.len());
        for picture in &pictures {
            picture_ids.push(uow.insert_picture(accommodation.id, picture).await?);
        }

        uow.commit().await?;

        tracing::info!(
            "Accommodation created: id={}, vendor_id={}, pictures={}",
            accommodation.id,
            vendor_id,
            picture_ids.len()
        );

        Ok(self.to_dto(accommodation, &picture_ids, 0))
    }

    pub async fn get_vendor_accommodations(&self, account_id: i64) -> Result<Vec<AccommodationDto>> {
        let vendor_id = self.vendor_id(account_id).await?;
        let accommodations = self.accommodations.find_by_vendor(vendor_id).await?;
        self.assemble_all(accommodations).await
    }

    pub async fn get_vendor_accommodation(
        &self,
        account_id: i64,
        id: i64,
    ) -> Result<AccommodationDto> {
        let accommodation = self.owned_accommodation(account_id, id).await?;
        self.assemble(accommodation).await
    }

    pub async fn change_vendor_accommodation_status(
        &self,
        account_id: i64,
        id: i64,
    ) -> Result<VisibilityChangeDto> {
        let vendor_id = self.vendor_id(account_id).await?;
        let visibility_status = self
            .accommodations
            .toggle_status_for_vendor(id, vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Accommodation not found".to_string()))?;

        tracing::info!("Accommodation {} status changed to {}", id, visibility_status);
        Ok(VisibilityChangeDto {
            id,
            visibility_status,
        })
    }

    /// Add a room to one of the vendor's accommodations
    pub async fn save_room(&self, account_id: i64, dto: SaveRoomDto) -> Result<RoomDto> {
        let accommodation = self
            .owned_accommodation(account_id, dto.accommodation_id)
            .await?;
        let new_room = dto.to_new_room();

        if self
            .accommodations
            .room_exists_by_name(accommodation.id, &new_room.name)
            .await?
        {
            return Err(AppError::Conflict(
                "There is an existing room for given name!".to_string(),
            ));
        }

        let room = self.accommodations.insert_room(&new_room).await?;
        tracing::info!(
            "Room created: id={}, accommodation_id={}",
            room.id,
            accommodation.id
        );

        Ok(room.into())
    }

    pub async fn get_rooms(
        &self,
        account_id: i64,
        accommodation_id: i64,
    ) -> Result<Vec<RoomDto>> {
        let accommodation = self.owned_accommodation(account_id, accommodation_id).await?;
        let rooms = self.accommodations.find_rooms(accommodation.id).await?;
        Ok(rooms.into_iter().map(Into::into).collect())
    }

    async fn owned_accommodation(&self, account_id: i64, id: i64) -> Result<Accommodation> {
        let vendor_id = self.vendor_id(account_id).await?;
        self.accommodations
            .find_for_vendor(id, vendor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Accommodation not found".to_string()))
    }

    async fn vendor_id(&self, account_id: i64) -> Result<i64> {
        self.vendors
            .find_by_account_id(account_id)
            .await?
            .map(|row| row.vendor.id)
            .ok_or_else(|| AppError::NotFound("Vendor not found".to_string()))
    }

    async fn assemble_all(&self, accommodations: Vec<Accommodation>) -> Result<Vec<AccommodationDto>> {
        let mut dtos = Vec::with_capacity(accommodations.len());
        for accommodation in accommodations {
            dtos.push(self.assemble(accommodation).await?);
        }
        Ok(dtos)
    }

    async fn assemble(&self, accommodation: Accommodation) -> Result<AccommodationDto> {
        let picture_ids = self.accommodations.find_picture_ids(accommodation.id).await?;
        let number_of_rooms = self.accommodations.count_rooms(accommodation.id).await?;
        Ok(self.to_dto(accommodation, &picture_ids, number_of_rooms))
    }

    fn to_dto(
        &self,
        a: Accommodation,
        picture_ids: &[i64],
        number_of_rooms: i64,
    ) -> AccommodationDto {
        AccommodationDto {
            id: a.id,
            name: a.name,
            description: a.description,
            telephone: a.telephone,
            email: a.email,
            address_line1: a.address_line1,
            address_line2: a.address_line2,
            city: a.city,
            province: a.province,
            postal_code: a.postal_code,
            latitude: a.latitude,
            longitude: a.longitude,
            check_in_time: a.check_in_time,
            check_out_time: a.check_out_time,
            parking: a.parking,
            smoking: a.smoking,
            pets: a.pets,
            rating: a.rating,
            rating_count: a.rating_count,
            status: a.status,
            location_id: a.location_id,
            vendor_id: a.vendor_id,
            accommodation_type_id: a.accommodation_type_id,
            accommodation_pictures: self
                .image_urls
                .urls(ACCOMMODATION_IMAGE_BASE_URL, picture_ids),
            number_of_rooms,
        }
    }
}
