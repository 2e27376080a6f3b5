//! Stored picture bytes, served by id.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/image/{kind}/{id}` | None | Picture bytes for location, location-attraction, activity or accommodation |

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ImageService;
