//! Provinces: the administrative regions locations belong to.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/admin/province/save` | Admin | Save a province |
//! | GET | `/admin/province/all` | Admin | List provinces |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgProvinceRepository;
pub use services::ProvinceService;
