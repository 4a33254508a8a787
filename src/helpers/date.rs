//! Date helper functions

use chrono::{DateTime, NaiveDate, TimeZone};

/// Format a date in the long display form used on listing pages,
/// like "January 15, 2024"
pub fn full_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date for feed and `<time datetime>` use (RFC 3339)
pub fn date_rfc3339<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_full_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(full_date(date), "January 15, 2024");
    }

    #[test]
    fn test_full_date_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(full_date(date), "March 2, 2024");
    }

    #[test]
    fn test_rfc3339_shape() {
        let date = Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let s = date_rfc3339(&date);
        assert!(s.starts_with("2024-01-15T10:30:00"));
    }
}
