use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::consts::DATE_FORMAT;
use crate::error::AppError;

/// Date-and-time layouts seen in transaction exports, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Date-only layouts, tried in order
const DATE_FORMATS: &[&str] = &[
    DATE_FORMAT,
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Offset-carrying layouts besides RFC 3339
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    // Try YYYYMMDD
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(d);
    }
    Err(AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Parse a `--reference` value: a date (midnight) or a full date-time
pub(crate) fn parse_reference(s: &str) -> Result<NaiveDateTime, AppError> {
    let trimmed = s.trim();
    if let Ok(date) = parse_date(trimmed) {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    parse_timestamp(trimmed).ok_or_else(|| AppError::InvalidDate {
        input: trimmed.to_string(),
    })
}

/// Parse a timestamp cell.
///
/// Offsets are not converted: the wall-clock date and time as written are
/// kept. Returns `None` for blank or unrecognized text.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Some(d.and_time(NaiveTime::MIN));
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Calendar day of a timestamp cell
pub(crate) fn parse_day(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_date_compact_and_dashed() {
        assert_eq!(parse_date("20240601").unwrap(), d(2024, 6, 1));
        assert_eq!(parse_date("2024-06-01").unwrap(), d(2024, 6, 1));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        let err = parse_date("June").unwrap_err();
        assert!(err.to_string().contains("June"));
    }

    #[test]
    fn parse_reference_date_is_midnight() {
        let r = parse_reference("2024-06-01").unwrap();
        assert_eq!(r, d(2024, 6, 1).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn parse_reference_keeps_time() {
        let r = parse_reference("2024-06-01T18:30:00").unwrap();
        assert_eq!(r, d(2024, 6, 1).and_hms_opt(18, 30, 0).unwrap());
        assert!(parse_reference("tomorrow").is_err());
    }

    #[test]
    fn parse_day_common_layouts() {
        for raw in [
            "2024-01-05",
            "2024-01-05 13:45:00",
            "2024-01-05 13:45:00.250",
            "2024-01-05T13:45:00",
            "2024-01-05 13:45",
            "2024/01/05",
            "20240105",
            "01/05/2024",
            "01/05/2024 1:45 PM",
            "5 Jan 2024",
            "January 5, 2024",
            "  2024-01-05  ",
        ] {
            assert_eq!(parse_day(raw), Some(d(2024, 1, 5)), "{raw}");
        }
    }

    #[test]
    fn parse_day_keeps_written_date_for_offsets() {
        // 23:30 at +03:00 is still January 5th as written
        assert_eq!(parse_day("2024-01-05T23:30:00+03:00"), Some(d(2024, 1, 5)));
        assert_eq!(parse_day("2024-01-05T23:30:00Z"), Some(d(2024, 1, 5)));
        assert_eq!(parse_day("2024-01-05 23:30:00-05:00"), Some(d(2024, 1, 5)));
    }

    #[test]
    fn parse_day_rejects_invalid() {
        assert_eq!(parse_day("not-a-date"), None);
        assert_eq!(parse_day(""), None);
        assert_eq!(parse_day("   "), None);
        assert_eq!(parse_day("2024-02-30"), None);
        assert_eq!(parse_day("13/45/2024"), None);
    }
}
