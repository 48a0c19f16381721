use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

/// Calendar used to decide what "now" means for period resolution
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Wall-clock time of `utc` in this zone, offset dropped
    pub(crate) fn wall_clock(self, utc: DateTime<Utc>) -> NaiveDateTime {
        self.to_fixed_offset(utc).naive_local()
    }

    pub(crate) fn now(self) -> NaiveDateTime {
        self.wall_clock(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_none_returns_local() {
        assert!(matches!(Timezone::parse(None).unwrap(), Timezone::Local));
    }

    #[test]
    fn parse_local_string_returns_local() {
        for raw in ["", "local", "LOCAL", "  Local  "] {
            assert!(matches!(Timezone::parse(Some(raw)).unwrap(), Timezone::Local));
        }
    }

    #[test]
    fn parse_utc_variants() {
        for raw in ["utc", "UTC", "z", "Z", "  UTC  "] {
            let tz = Timezone::parse(Some(raw)).unwrap();
            assert!(matches!(tz, Timezone::Named(chrono_tz::UTC)), "{raw}");
        }
    }

    #[test]
    fn parse_named_timezone() {
        let tz = Timezone::parse(Some("Asia/Riyadh")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::Asia::Riyadh)));
    }

    #[test]
    fn parse_invalid_timezone_returns_error() {
        let err = Timezone::parse(Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn wall_clock_can_cross_midnight() {
        // 22:30 UTC is already the next day in Riyadh (UTC+3)
        let utc = "2024-02-28T22:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let riyadh = Timezone::parse(Some("Asia/Riyadh")).unwrap();
        assert_eq!(
            riyadh.wall_clock(utc).format("%Y-%m-%d %H:%M").to_string(),
            "2024-02-29 01:30"
        );
        let utc_zone = Timezone::Named(chrono_tz::UTC);
        assert_eq!(
            utc_zone.wall_clock(utc).format("%Y-%m-%d %H:%M").to_string(),
            "2024-02-28 22:30"
        );
    }

    #[test]
    fn to_fixed_offset_named_shifts_time() {
        let utc = "2026-06-15T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let tz = Timezone::parse(Some("America/New_York")).unwrap();
        let fixed = tz.to_fixed_offset(utc);
        // EDT is UTC-4 in June
        assert_eq!(fixed.offset().local_minus_utc(), -4 * 3600);
        assert_eq!(fixed.format("%H:%M").to_string(), "08:00");
    }
}
