//! Activity catalog (hiking, surfing, ...) that locations link to.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/admin/activity/save` | Admin | Save an activity |
//! | GET | `/admin/activity/all` | Admin | List activities |
//! | GET | `/admin/activity/{id}` | Admin | Get activity |
//! | POST | `/admin/activity/status/{id}` | Admin | Toggle visibility |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgActivityRepository;
pub use services::ActivityService;
