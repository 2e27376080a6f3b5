use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::UserStatus;
use crate::features::public_users::models::{Gender, PublicUser, PublicUserUpdate};

/// Request DTO for public user registration; the email doubles as the username
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserRegistrationDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(
        length(min = 1, max = 255, message = "First name must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "First name must not be blank"
        )
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = 255, message = "Last name must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "Last name must not be blank"
        )
    )]
    pub last_name: String,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Mobile must contain digits, spaces or hyphens"
    ))]
    pub mobile: Option<String>,
}

/// Response DTO for registration; the code itself is only delivered out of band
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserRegistrationResponseDto {
    pub email: String,
    pub status: UserStatus,
}

/// Request DTO for confirming the emailed code
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserCodeVerifyDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(equal = 6, message = "Verification code must be 6 digits"))]
    pub code: String,
}

/// Profile view of the authenticated public user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserDetailsDto {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub nationality: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub town: Option<String>,
    pub zipcode: Option<String>,
}

impl PublicUserDetailsDto {
    pub fn new(username: String, user: PublicUser) -> Self {
        Self {
            username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            mobile: user.mobile,
            birthday: user.birthday,
            gender: user.gender,
            nationality: user.nationality,
            country: user.country,
            address: user.address,
            town: user.town,
            zipcode: user.zipcode,
        }
    }
}

/// Request DTO for profile updates; email and username cannot change
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePublicUserDto {
    #[validate(
        length(min = 1, max = 255, message = "First name must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "First name must not be blank"
        )
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = 255, message = "Last name must be 1-255 characters"),
        custom(
            function = "crate::shared::validation::not_blank",
            message = "Last name must not be blank"
        )
    )]
    pub last_name: String,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Mobile must contain digits, spaces or hyphens"
    ))]
    pub mobile: Option<String>,

    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,

    #[validate(length(max = 128))]
    pub nationality: Option<String>,

    #[validate(length(max = 128))]
    pub country: Option<String>,

    pub address: Option<String>,

    #[validate(length(max = 128))]
    pub town: Option<String>,

    #[validate(length(max = 32))]
    pub zipcode: Option<String>,
}

impl From<UpdatePublicUserDto> for PublicUserUpdate {
    fn from(dto: UpdatePublicUserDto) -> Self {
        Self {
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            mobile: dto.mobile,
            birthday: dto.birthday,
            gender: dto.gender,
            nationality: dto.nationality,
            country: dto.country,
            address: dto.address,
            town: dto.town,
            zipcode: dto.zipcode,
        }
    }
}
