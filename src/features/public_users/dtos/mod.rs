mod public_user_dto;

pub use public_user_dto::*;
