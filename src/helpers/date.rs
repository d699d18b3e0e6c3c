//! Date helper functions

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Date-time layouts tried before falling back to date-only layouts
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Parse a post date string in one of the common authoring formats.
///
/// Only used to order posts; the stored date string is never rewritten.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_parse_iso_dates() {
        assert_eq!(parse_date("2024-01-15"), ymd(2024, 1, 15));
        assert_eq!(parse_date(" 2024/01/15 "), ymd(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15 10:30:00"), ymd(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15T10:30:00+09:00"), ymd(2024, 1, 15));
    }

    #[test]
    fn test_parse_written_dates() {
        assert_eq!(parse_date("Oct 12, 2023"), ymd(2023, 10, 12));
        assert_eq!(parse_date("October 12, 2023"), ymd(2023, 10, 12));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("someday"), None);
    }
}
