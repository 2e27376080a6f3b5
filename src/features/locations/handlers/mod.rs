pub mod attraction_handler;
pub mod location_handler;

pub use attraction_handler::*;
pub use location_handler::*;
