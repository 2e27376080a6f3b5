mod location;
mod location_attraction;

pub use location::{Location, NewLocation};
pub use location_attraction::{LocationAttraction, NewLocationAttraction};
