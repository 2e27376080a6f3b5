use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{UserRole, UserStatus};
use crate::features::auth::repositories::UserRepository;
use crate::features::public_users::dtos::{
    PublicUserCodeVerifyDto, PublicUserDetailsDto, PublicUserRegistrationDto,
    PublicUserRegistrationResponseDto, UpdatePublicUserDto,
};
use crate::features::public_users::models::NewPublicUser;
use crate::features::public_users::repositories::PublicUserRepository;
use crate::features::public_users::services::{generate_verification_code, VerificationCodeSender};
use crate::shared::password::hash_password_blocking;

/// Service for public user self-registration and profile management
pub struct PublicUserService {
    public_users: Arc<dyn PublicUserRepository>,
    users: Arc<dyn UserRepository>,
    code_sender: Arc<dyn VerificationCodeSender>,
    code_ttl: Duration,
}

impl PublicUserService {
    pub fn new(
        public_users: Arc<dyn PublicUserRepository>,
        users: Arc<dyn UserRepository>,
        code_sender: Arc<dyn VerificationCodeSender>,
        code_ttl: Duration,
    ) -> Self {
        Self {
            public_users,
            users,
            code_sender,
            code_ttl,
        }
    }

    /// Create a PENDING account and profile, then send the verification code
    pub async fn register(
        &self,
        dto: PublicUserRegistrationDto,
    ) -> Result<PublicUserRegistrationResponseDto> {
        let email = dto.email.trim().to_lowercase();
        let password_hash = hash_password_blocking(dto.password).await?;
        let code = generate_verification_code();
        let ttl = chrono::Duration::from_std(self.code_ttl)
            .map_err(|e| AppError::Internal(format!("Invalid verification code TTL: {}", e)))?;

        let mut uow = self.public_users.begin().await?;

        if uow.email_taken(&email).await? || uow.username_taken(&email).await? {
            return Err(AppError::Conflict(
                "There is an existing user for given email!".to_string(),
            ));
        }

        let account = uow
            .insert_account(
                &email,
                &password_hash,
                UserRole::PublicUser,
                UserStatus::Pending,
            )
            .await?;

        let profile = uow
            .insert_profile(&NewPublicUser {
                account_id: account.id,
                first_name: dto.first_name.trim().to_string(),
                last_name: dto.last_name.trim().to_string(),
                email: email.clone(),
                mobile: dto.mobile,
                verification_code: code.clone(),
                verification_expires_at: Utc::now() + ttl,
            })
            .await?;

        // A failed delivery drops the unit of work, so the email stays free to retry.
        self.code_sender.send_code(&email, &code).await?;

        uow.commit().await?;
        tracing::info!(
            "Public user registered: id={}, account_id={}",
            profile.id,
            account.id
        );

        Ok(PublicUserRegistrationResponseDto {
            email,
            status: account.status,
        })
    }

    /// Activate the account when the code matches and has not expired
    pub async fn verify(&self, dto: PublicUserCodeVerifyDto) -> Result<()> {
        let mut uow = self.public_users.begin().await?;

        let profile = uow
            .lock_by_email(dto.email.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let code_matches = profile.verification_code.as_deref() == Some(dto.code.trim());
        let not_expired = profile
            .verification_expires_at
            .map(|expires_at| expires_at > Utc::now())
            .unwrap_or(false);

        if !code_matches || !not_expired {
            return Err(AppError::BadRequest(
                "Invalid or expired verification code".to_string(),
            ));
        }

        uow.set_account_status(profile.account_id, UserStatus::Active)
            .await?;
        uow.clear_verification(profile.id).await?;
        uow.commit().await?;

        tracing::info!("Public user verified: account_id={}", profile.account_id);
        Ok(())
    }

    pub async fn get_details(&self, account_id: i64) -> Result<PublicUserDetailsDto> {
        let account = self
            .users
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let profile = self
            .public_users
            .find_by_account_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(PublicUserDetailsDto::new(account.username, profile))
    }

    pub async fn update_details(
        &self,
        account_id: i64,
        dto: UpdatePublicUserDto,
    ) -> Result<PublicUserDetailsDto> {
        let account = self
            .users
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let profile = self
            .public_users
            .update_details(account_id, &dto.into())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("Public user details updated: account_id={}", account_id);
        Ok(PublicUserDetailsDto::new(account.username, profile))
    }
}
