use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::accommodations::{
    dtos as accommodations_dtos, handlers as accommodations_handlers,
};
use crate::features::activities::{dtos as activities_dtos, handlers as activities_handlers};
use crate::features::auth::{
    dtos as auth_dtos, error as auth_error, handlers as auth_handlers, model as auth_model,
};
use crate::features::images::handlers as images_handlers;
use crate::features::locations::{dtos as locations_dtos, handlers as locations_handlers};
use crate::features::provinces::{dtos as provinces_dtos, handlers as provinces_handlers};
use crate::features::public_users::{
    dtos as public_users_dtos, handlers as public_users_handlers, models as public_users_models,
};
use crate::features::vendors::{dtos as vendors_dtos, handlers as vendors_handlers};
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::visibility::{VisibilityChangeDto, VisibilityStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        // OAuth2
        auth_handlers::token,
        auth_handlers::authorize,
        // Public users
        public_users_handlers::register,
        public_users_handlers::verify,
        public_users_handlers::get_details,
        public_users_handlers::update_details,
        // Images
        images_handlers::get_image,
        // Provinces (admin)
        provinces_handlers::save_province,
        provinces_handlers::get_all_provinces,
        // Activities (admin)
        activities_handlers::save_activity,
        activities_handlers::get_all_activities,
        activities_handlers::get_activity,
        activities_handlers::change_activity_status,
        // Locations (admin)
        locations_handlers::save_location,
        locations_handlers::update_location,
        locations_handlers::change_location_status,
        locations_handlers::get_all_locations,
        locations_handlers::get_location,
        locations_handlers::save_attraction,
        locations_handlers::update_attraction,
        locations_handlers::change_attraction_status,
        locations_handlers::search_attractions,
        locations_handlers::get_attraction,
        // Vendors
        vendors_handlers::save_vendor,
        vendors_handlers::get_all_vendors,
        vendors_handlers::get_profile,
        // Accommodations
        accommodations_handlers::save_accommodation_type,
        accommodations_handlers::get_all_accommodation_types,
        accommodations_handlers::get_all_accommodations,
        accommodations_handlers::save_accommodation,
        accommodations_handlers::get_vendor_accommodations,
        accommodations_handlers::get_vendor_accommodation,
        accommodations_handlers::change_accommodation_status,
        accommodations_handlers::save_room,
        accommodations_handlers::get_rooms,
    ),
    components(
        schemas(
            // Shared
            Meta,
            VisibilityStatus,
            VisibilityChangeDto,
            ApiResponse<VisibilityChangeDto>,
            // OAuth2
            auth_model::UserRole,
            auth_model::UserStatus,
            auth_model::UserDetailsClaim,
            auth_dtos::TokenRequestForm,
            auth_dtos::AuthorizeForm,
            auth_dtos::TokenResponseDto,
            auth_error::OAuthErrorBody,
            // Public users
            public_users_models::Gender,
            public_users_dtos::PublicUserRegistrationDto,
            public_users_dtos::PublicUserRegistrationResponseDto,
            public_users_dtos::PublicUserCodeVerifyDto,
            public_users_dtos::PublicUserDetailsDto,
            public_users_dtos::UpdatePublicUserDto,
            ApiResponse<public_users_dtos::PublicUserRegistrationResponseDto>,
            ApiResponse<public_users_dtos::PublicUserDetailsDto>,
            // Provinces
            provinces_dtos::SaveProvinceDto,
            provinces_dtos::ProvinceDto,
            ApiResponse<provinces_dtos::ProvinceDto>,
            ApiResponse<Vec<provinces_dtos::ProvinceDto>>,
            // Activities
            activities_dtos::SaveActivityDto,
            activities_dtos::ActivityDto,
            ApiResponse<activities_dtos::ActivityDto>,
            ApiResponse<Vec<activities_dtos::ActivityDto>>,
            // Locations
            locations_dtos::ActivityRefDto,
            locations_dtos::SaveLocationDto,
            locations_dtos::UpdateLocationDto,
            locations_dtos::LocationActivityDto,
            locations_dtos::LocationSummaryDto,
            locations_dtos::LocationDetailDto,
            locations_dtos::SaveLocationAttractionDto,
            locations_dtos::UpdateLocationAttractionDto,
            locations_dtos::LocationAttractionDto,
            ApiResponse<locations_dtos::LocationDetailDto>,
            ApiResponse<Vec<locations_dtos::LocationSummaryDto>>,
            ApiResponse<locations_dtos::LocationAttractionDto>,
            ApiResponse<Vec<locations_dtos::LocationAttractionDto>>,
            // Vendors
            vendors_dtos::SaveVendorDto,
            vendors_dtos::VendorDto,
            ApiResponse<vendors_dtos::VendorDto>,
            ApiResponse<Vec<vendors_dtos::VendorDto>>,
            // Accommodations
            accommodations_dtos::SaveAccommodationTypeDto,
            accommodations_dtos::AccommodationTypeDto,
            accommodations_dtos::SaveAccommodationDto,
            accommodations_dtos::AccommodationDto,
            ApiResponse<accommodations_dtos::AccommodationTypeDto>,
            ApiResponse<Vec<accommodations_dtos::AccommodationTypeDto>>,
            ApiResponse<accommodations_dtos::AccommodationDto>,
            ApiResponse<Vec<accommodations_dtos::AccommodationDto>>,
            accommodations_dtos::SaveRoomDto,
            accommodations_dtos::RoomDto,
            ApiResponse<accommodations_dtos::RoomDto>,
            ApiResponse<Vec<accommodations_dtos::RoomDto>>,
        )
    ),
    tags(
        (name = "oauth", description = "OAuth2 token and authorize endpoints"),
        (name = "public-users", description = "Public user registration and profile"),
        (name = "images", description = "Stored pictures served by id"),
        (name = "provinces", description = "Province administration"),
        (name = "activities", description = "Activity administration"),
        (name = "locations", description = "Location administration"),
        (name = "location-attractions", description = "Attractions within a location"),
        (name = "vendors", description = "Vendor accounts"),
        (name = "accommodations", description = "Accommodation types and vendor listings"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Tourism Administration API",
        version = "0.1.0",
        description = "API documentation for the tourism administration backend",
    )
)]
pub struct ApiDoc;

/// Registers the bearer access token and the HTTP Basic client credential schemes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "basic_client",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
