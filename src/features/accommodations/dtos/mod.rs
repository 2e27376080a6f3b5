mod accommodation_dto;
mod accommodation_type_dto;
mod room_dto;

pub use accommodation_dto::*;
pub use accommodation_type_dto::*;
pub use room_dto::*;
