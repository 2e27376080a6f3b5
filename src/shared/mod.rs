pub mod constants;
pub mod datetime;
pub mod images;
pub mod password;
pub mod types;
pub mod validation;
pub mod visibility;

#[cfg(test)]
pub mod test_helpers;
