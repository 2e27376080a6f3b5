use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{UserRole, UserStatus};
use crate::features::vendors::dtos::{SaveVendorDto, VendorDto};
use crate::features::vendors::models::NewVendor;
use crate::features::vendors::repositories::{VendorRepository, VendorWithAccount};
use crate::shared::password::hash_password_blocking;

/// Service for vendor accounts
pub struct VendorService {
    vendors: Arc<dyn VendorRepository>,
}

impl VendorService {
    pub fn new(vendors: Arc<dyn VendorRepository>) -> Self {
        Self { vendors }
    }

    /// Create an ACTIVE vendor account and its business profile
    pub async fn save_vendor(&self, dto: SaveVendorDto) -> Result<VendorDto> {
        let username = dto.username.trim().to_string();
        let password_hash = hash_password_blocking(dto.password).await?;

        let mut uow = self.vendors.begin().await?;

        if uow.username_taken(&username).await? {
            return Err(AppError::Conflict(
                "There is an existing user for given username!".to_string(),
            ));
        }

        let account = uow
            .insert_account(&username, &password_hash, UserRole::Vendor, UserStatus::Active)
            .await?;

        let vendor = uow
            .insert_vendor(&NewVendor {
                account_id: account.id,
                business_name: dto.business_name.trim().to_string(),
                email: dto.email.trim().to_string(),
                telephone: dto.telephone,
                address: dto.address,
            })
            .await?;

        uow.commit().await?;
        tracing::info!(
            "Vendor created: id={}, username={}",
            vendor.id,
            account.username
        );

        Ok(VendorDto::new(account.username, account.status, vendor))
    }

    pub async fn get_all_vendors(&self) -> Result<Vec<VendorDto>> {
        let vendors = self.vendors.find_all().await?;
        Ok(vendors.into_iter().map(to_dto).collect())
    }

    /// Profile of the vendor owning this account
    pub async fn get_profile(&self, account_id: i64) -> Result<VendorDto> {
        self.vendors
            .find_by_account_id(account_id)
            .await?
            .map(to_dto)
            .ok_or_else(|| AppError::NotFound("Vendor not found".to_string()))
    }
}

fn to_dto(row: VendorWithAccount) -> VendorDto {
    VendorDto::new(row.username, row.status, row.vendor)
}
