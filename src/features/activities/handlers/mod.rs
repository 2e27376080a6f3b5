pub mod activity_handler;

pub use activity_handler::*;
