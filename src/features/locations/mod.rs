//! Locations and their attractions: the core content workflow.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/admin/location/save` | Admin | Create location with pictures and activities |
//! | POST | `/admin/location/update` | Admin | Update location |
//! | POST | `/admin/location/status/{id}` | Admin | Toggle visibility |
//! | GET | `/admin/location/all?text=` | Admin | List/search locations |
//! | GET | `/admin/location/{id}` | Admin | Composite location view |
//! | POST | `/admin/location/attraction/save` | Admin | Create attraction |
//! | POST | `/admin/location/attraction/update` | Admin | Update attraction |
//! | POST | `/admin/location/attraction/status/{id}` | Admin | Toggle visibility |
//! | GET | `/admin/location/attraction/all?text=` | Admin | Search attractions |
//! | GET | `/admin/location/attraction/{id}` | Admin | Get attraction |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgAttractionRepository, PgLocationRepository};
pub use services::{AttractionService, LocationService};
