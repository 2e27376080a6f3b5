//! Vendors: admin-created business accounts that publish accommodations.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/admin/vendor/save` | Admin | Create vendor account |
//! | GET | `/admin/vendor/all` | Admin | List vendors |
//! | GET | `/vendor/profile` | Vendor | Own profile |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgVendorRepository;
pub use services::VendorService;
