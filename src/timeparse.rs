// ABOUTME: Date/time parsing for PDF info dates, Open Graph timestamps, and embedded-JSON dates.
// ABOUTME: All parsers are pure functions returning None for unparseable input.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a signed two-digit number; the last occurrence in a date string
/// is its UTC offset in hours (earlier matches are date-internal fragments
/// like `-01`).
static UTC_OFFSET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[+-]\d{2}").unwrap());

/// Extract the trailing signed hour offset from a date string, or 0.
fn utc_offset_hours(s: &str) -> i64 {
    UTC_OFFSET_RE
        .find_iter(s)
        .last()
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Parse a PDF info dictionary date: `D:YYYYMMDDHHMMSS±HH'mm'`.
///
/// The `D:` prefix and trailing zone fragment are stripped, the 14-digit
/// timestamp parsed, and the signed hour offset added to normalize to UTC.
/// A date without a zone fragment is treated as already UTC.
pub fn parse_pdf_time(s: &str) -> Option<DateTime<Utc>> {
    let rest = s.trim().strip_prefix("D:").unwrap_or(s.trim());
    let digits = rest.get(..14)?;
    let naive = NaiveDateTime::parse_from_str(digits, "%Y%m%d%H%M%S").ok()?;
    let offset = utc_offset_hours(rest);
    Some(Utc.from_utc_datetime(&naive) + Duration::hours(offset))
}

/// Parse an Open Graph timestamp: `YYYY-MM-DDTHH:MM:SS±HH:MM`, with a
/// legacy `DD/MM/YYYY HH:MM:SS` fallback. `Z`-suffixed RFC3339 strings are
/// accepted directly.
pub fn parse_opengraph_time(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if trimmed.ends_with('Z') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(dt.with_timezone(&Utc));
        }
        return None;
    }
    if trimmed.len() < 6 {
        return None;
    }
    let body = trimmed.get(..trimmed.len() - 6)?;
    let naive = NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(body.trim(), "%d/%m/%Y %H:%M:%S"))
        .ok()?;
    let offset = utc_offset_hours(trimmed);
    Some(Utc.from_utc_datetime(&naive) + Duration::hours(offset))
}

/// Parse an embedded-JSON timestamp: plain `YYYY-MM-DD HH:MM:SS`, no offset.
pub fn parse_embedded_time(s: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S").ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn pdf_time_with_positive_offset() {
        let dt = parse_pdf_time("D:20240115100000+02'00'").expect("should parse");
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 12); // 10:00 + 2h
    }

    #[test]
    fn pdf_time_with_negative_offset() {
        let dt = parse_pdf_time("D:20240115100000-05'00'").expect("should parse");
        assert_eq!(dt.hour(), 5);
    }

    #[test]
    fn pdf_time_without_offset_is_utc() {
        let dt = parse_pdf_time("D:20240115100000").expect("should parse");
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn pdf_time_garbage_is_none() {
        assert!(parse_pdf_time("not a date").is_none());
        assert!(parse_pdf_time("D:2024").is_none());
        assert!(parse_pdf_time("").is_none());
    }

    #[test]
    fn opengraph_time_iso_with_offset() {
        let dt = parse_opengraph_time("2024-01-15T10:00:00+02:00").expect("should parse");
        assert_eq!(dt.hour(), 12);
        assert_eq!(dt.day(), 15);
    }

    #[test]
    fn opengraph_time_offset_is_last_match() {
        // The "-01" in the date part must not be taken as the offset.
        let dt = parse_opengraph_time("2024-01-15T10:00:00+00:00").expect("should parse");
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn opengraph_time_zulu() {
        let dt = parse_opengraph_time("2024-01-15T10:00:00Z").expect("should parse");
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn opengraph_time_legacy_form() {
        let dt = parse_opengraph_time("15/01/2024 10:00:00+01:00").expect("should parse");
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.hour(), 11);
    }

    #[test]
    fn opengraph_time_garbage_is_none() {
        assert!(parse_opengraph_time("soon").is_none());
        assert!(parse_opengraph_time("").is_none());
    }

    #[test]
    fn embedded_time_plain() {
        let dt = parse_embedded_time("2024-01-15 10:00:00").expect("should parse");
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn embedded_time_garbage_is_none() {
        assert!(parse_embedded_time("2024-01-15").is_none());
        assert!(parse_embedded_time("").is_none());
    }
}
