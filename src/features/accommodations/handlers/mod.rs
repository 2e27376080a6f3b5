pub mod accommodation_handler;
pub mod accommodation_type_handler;
pub mod room_handler;

pub use accommodation_handler::*;
pub use accommodation_type_handler::*;
pub use room_handler::*;
