use chrono::{DateTime, Utc};

/// Medium-style timestamp used in list and detail views, e.g. `Oct 19, 2026, 3:04:05 PM`.
pub fn format_medium(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y, %-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_medium_afternoon() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 15, 4, 5).unwrap();
        assert_eq!(format_medium(&ts), "Oct 19, 2026, 3:04:05 PM");
    }

    #[test]
    fn test_format_medium_midnight() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 30, 0).unwrap();
        assert_eq!(format_medium(&ts), "Jan 2, 2024, 12:30:00 AM");
    }
}
