// =============================================================================
// IMAGE URLS
// =============================================================================

/// Base path for location picture bytes (`/image/location/{picture_id}`)
pub const LOCATION_IMAGE_BASE_URL: &str = "/image/location";

/// Base path for location attraction picture bytes
pub const LOCATION_ATTRACTION_IMAGE_BASE_URL: &str = "/image/location-attraction";

/// Base path for activity images, keyed by activity id
pub const ACTIVITY_IMAGE_BASE_URL: &str = "/image/activity";

/// Base path for accommodation picture bytes
pub const ACCOMMODATION_IMAGE_BASE_URL: &str = "/image/accommodation";

// =============================================================================
// OAUTH CLIENTS
// =============================================================================

pub const ADMIN_CLIENT_ID: &str = "admin";
pub const ADMIN_ACCESS_TOKEN_VALIDITY_SECONDS: i64 = 2 * 60 * 60;
pub const ADMIN_REFRESH_TOKEN_VALIDITY_SECONDS: i64 = 60 * 60 * 24 * 30;

pub const PUBLIC_USER_CLIENT_ID: &str = "public_user";
pub const PUBLIC_USER_ACCESS_TOKEN_VALIDITY_SECONDS: i64 = 24 * 60 * 60;
pub const PUBLIC_USER_REFRESH_TOKEN_VALIDITY_SECONDS: i64 = 60 * 60 * 24 * 30 * 12;

pub const VENDOR_CLIENT_ID: &str = "vendor";
pub const VENDOR_ACCESS_TOKEN_VALIDITY_SECONDS: i64 = 24 * 60 * 60;
pub const VENDOR_REFRESH_TOKEN_VALIDITY_SECONDS: i64 = 60 * 60 * 24 * 30 * 12;

/// Authorization codes are single-purpose and short lived
pub const AUTHORIZATION_CODE_VALIDITY_SECONDS: i64 = 10 * 60;

pub const GRANT_TYPE_PASSWORD: &str = "password";
pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";
pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";
pub const GRANT_TYPE_IMPLICIT: &str = "implicit";

pub const SCOPE_READ: &str = "read";
pub const SCOPE_WRITE: &str = "write";
pub const SCOPE_TRUST: &str = "trust";

/// Message returned for every rejected grant, whatever the underlying cause
pub const INVALID_GRANT_MESSAGE: &str = "You have entered an invalid username or password";
