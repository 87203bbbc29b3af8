//! Date parsing and formatting for content front matter, feeds and lists.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a front matter date.
///
/// Accepted formats:
/// - `YYYY-MM-DD` (midnight UTC)
/// - `YYYY-MM-DD HH:MM` / `YYYY-MM-DDTHH:MM` (UTC)
/// - RFC 3339 (`2024-01-15T10:00:00+02:00`), converted to UTC
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Medium English date used in item lists: `Jan 1, 2024`.
pub fn format_medium(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `YYYY-MM-DD`, for sitemap `<lastmod>` and `<time datetime>`.
pub fn format_ymd(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// RFC 2822, for rss `<pubDate>`.
pub fn format_rfc2822(date: &DateTime<Utc>) -> String {
    date.to_rfc2822()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date_only() {
        let dt = parse("2024-02-29").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 2, 29));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_date_with_time() {
        let dt = parse("2024-01-15 10:30").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (10, 30));

        let dt = parse("2024-01-15T10:30").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (10, 30));
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let dt = parse("2024-01-15T10:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse("").is_none());
        assert!(parse("2024-13-01").is_none());
        assert!(parse("2023-02-29").is_none());
        assert!(parse("yesterday").is_none());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse("  2024-01-01 ").is_some());
    }

    #[test]
    fn test_format_medium() {
        let dt = parse("2024-01-01").unwrap();
        assert_eq!(format_medium(&dt), "Jan 1, 2024");
        let dt = parse("2023-11-23").unwrap();
        assert_eq!(format_medium(&dt), "Nov 23, 2023");
    }

    #[test]
    fn test_format_ymd() {
        let dt = parse("2024-03-05 23:59").unwrap();
        assert_eq!(format_ymd(&dt), "2024-03-05");
    }

    #[test]
    fn test_format_rfc2822() {
        let dt = parse("2024-01-01").unwrap();
        let formatted = format_rfc2822(&dt);
        assert!(formatted.starts_with("Mon, "));
        assert!(formatted.ends_with("Jan 2024 00:00:00 +0000"));
    }
}
