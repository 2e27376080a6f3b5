mod accommodation;
mod accommodation_type;
mod room;

pub use accommodation::{Accommodation, NewAccommodation};
pub use accommodation_type::AccommodationType;
pub use room::{NewRoom, Room};
