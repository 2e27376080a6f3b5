mod accommodation_service;

pub use accommodation_service::AccommodationService;
