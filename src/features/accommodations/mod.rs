//! Accommodations published by vendors, and their admin-managed types.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/admin/accommodation-type/save` | Admin | Create accommodation type |
//! | GET | `/admin/accommodation-type/all` | Admin | List accommodation types |
//! | GET | `/admin/accommodation/all` | Admin | List all accommodations |
//! | POST | `/vendor/accommodation/save` | Vendor | Create accommodation |
//! | GET | `/vendor/accommodation/all` | Vendor | List own accommodations |
//! | GET | `/vendor/accommodation/{id}` | Vendor | Get own accommodation |
//! | POST | `/vendor/accommodation/status/{id}` | Vendor | Toggle own accommodation |
//! | POST | `/vendor/accommodation/room/save` | Vendor | Add a room to own accommodation |
//! | GET | `/vendor/accommodation/{id}/rooms` | Vendor | List rooms of own accommodation |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgAccommodationRepository, PgAccommodationTypeRepository};
pub use services::AccommodationService;
