pub mod public_user_handler;

pub use public_user_handler::*;
