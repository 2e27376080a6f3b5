//! Self-registered public users.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/public/user/register` | None | Register, sends a verification code |
//! | POST | `/public/user/verify` | None | Activate with the code |
//! | GET | `/public/user/details` | Public user | Own profile |
//! | POST | `/public/user/update` | Public user | Update own profile |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgPublicUserRepository;
pub use services::{LoggingCodeSender, PublicUserService};
