use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters,
    /// underscores, dots and hyphens
    /// - Valid: "john_doe", "user123", "_admin", "kandy.tours"
    /// - Invalid: "123user", "-user", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_.\-]*$").unwrap();

    /// Regex for telephone/mobile numbers: optional leading +, digits, spaces and hyphens
    /// - Valid: "+94 81 222 3333", "0812223333", "081-2223333"
    /// - Invalid: "phone", "++94", "81/222"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{5,19}$").unwrap();
}

/// Rejects values that are empty once surrounding whitespace is trimmed.
///
/// Stored names are trimmed, so a whitespace-only name would otherwise pass
/// the length rule and persist as an empty string.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("Value must not be blank")));
    }
    Ok(())
}
