mod vendor;

pub use vendor::{NewVendor, Vendor};
