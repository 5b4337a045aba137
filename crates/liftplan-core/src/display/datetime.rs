//! Timestamps rendered in the system time zone.

use std::fmt;

use jiff::{Timestamp, tz::TimeZone};

/// `YYYY-MM-DD HH:MM TZ` in the system time zone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

/// `YYYY-MM-DD` in the system time zone, for lists.
pub struct LocalDate<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime("%Y-%m-%d %H:%M %Z"))
    }
}

impl fmt::Display for LocalDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_date_shape() {
        let ts = Timestamp::from_second(1640995200).unwrap();
        let date = LocalDate(&ts).to_string();
        assert_eq!(date.len(), 10);
        assert!(date.starts_with("202"));
        assert!(LocalDateTime(&ts).to_string().starts_with(&date));
    }
}
