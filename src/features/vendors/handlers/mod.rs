pub mod vendor_handler;

pub use vendor_handler::*;
