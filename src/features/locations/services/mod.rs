mod attraction_service;
mod location_service;

pub use attraction_service::AttractionService;
pub use location_service::LocationService;
