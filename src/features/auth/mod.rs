//! OAuth2 authorization server and request authentication.
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/oauth/token` | Client (Basic or form) | password, refresh_token, authorization_code grants |
//! | POST | `/oauth/authorize` | Client id + user credentials | code and implicit grants (302 redirect) |

pub mod clients;
pub mod dtos;
pub mod error;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod token;

pub use clients::ClientRegistry;
pub use repositories::PgUserRepository;
pub use services::AuthService;
pub use token::JwtTokenIssuer;
