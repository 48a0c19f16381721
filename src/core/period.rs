//! Named calendar periods and their resolution into date windows

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use std::fmt;

/// Named calendar-window selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Period {
    AllTime,
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    Last90Days,
    Last180Days,
    Last365Days,
    ThisMonth,
    PreviousMonth,
    ThisYear,
    PreviousYear,
}

impl Period {
    /// Every period, in menu order
    pub(crate) const ALL: [Period; 12] = [
        Period::AllTime,
        Period::Today,
        Period::Yesterday,
        Period::Last7Days,
        Period::Last30Days,
        Period::Last90Days,
        Period::Last180Days,
        Period::Last365Days,
        Period::ThisMonth,
        Period::PreviousMonth,
        Period::ThisYear,
        Period::PreviousYear,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Period::AllTime => "All Time",
            Period::Today => "Today",
            Period::Yesterday => "Yesterday",
            Period::Last7Days => "Last 7 Days",
            Period::Last30Days => "Last 30 Days",
            Period::Last90Days => "Last 90 Days",
            Period::Last180Days => "Last 180 Days",
            Period::Last365Days => "Last 365 Days",
            Period::ThisMonth => "This Month",
            Period::PreviousMonth => "Previous Month",
            Period::ThisYear => "This Year",
            Period::PreviousYear => "Previous Year",
        }
    }

    /// Command-line spelling, e.g. `last-30-days`
    pub(crate) fn slug(self) -> &'static str {
        match self {
            Period::AllTime => "all-time",
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::Last7Days => "last-7-days",
            Period::Last30Days => "last-30-days",
            Period::Last90Days => "last-90-days",
            Period::Last180Days => "last-180-days",
            Period::Last365Days => "last-365-days",
            Period::ThisMonth => "this-month",
            Period::PreviousMonth => "previous-month",
            Period::ThisYear => "this-year",
            Period::PreviousYear => "previous-year",
        }
    }

    /// Window length for the rolling `Last N Days` periods
    fn trailing_days(self) -> Option<u64> {
        match self {
            Period::Last7Days => Some(7),
            Period::Last30Days => Some(30),
            Period::Last90Days => Some(90),
            Period::Last180Days => Some(180),
            Period::Last365Days => Some(365),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-supplied period selector, kept even when it names no known period
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum PeriodToken {
    Known(Period),
    Unknown(String),
}

impl PeriodToken {
    /// Accepts the display label ("Last 7 Days"), the slug ("last-7-days"),
    /// and a few short aliases ("7d", "all", "last-month"). Case, spaces,
    /// dashes and underscores are ignored.
    pub(crate) fn parse(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        let period = match key.as_str() {
            "alltime" | "all" => Period::AllTime,
            "today" => Period::Today,
            "yesterday" => Period::Yesterday,
            "last7days" | "7d" => Period::Last7Days,
            "last30days" | "30d" => Period::Last30Days,
            "last90days" | "90d" => Period::Last90Days,
            "last180days" | "180d" => Period::Last180Days,
            "last365days" | "365d" => Period::Last365Days,
            "thismonth" => Period::ThisMonth,
            "previousmonth" | "prevmonth" | "lastmonth" => Period::PreviousMonth,
            "thisyear" => Period::ThisYear,
            "previousyear" | "prevyear" | "lastyear" => Period::PreviousYear,
            _ => return PeriodToken::Unknown(raw.trim().to_string()),
        };
        PeriodToken::Known(period)
    }

    pub(crate) fn label(&self) -> &str {
        match self {
            PeriodToken::Known(period) => period.label(),
            PeriodToken::Unknown(raw) => raw,
        }
    }
}

impl From<Period> for PeriodToken {
    fn from(period: Period) -> Self {
        PeriodToken::Known(period)
    }
}

/// Why a window places no bounds on the data
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UnboundedReason {
    AllTime,
    /// Unrecognized token; resolved with all-time semantics
    UnknownPeriod(String),
}

/// Inclusive calendar-day window, or no window at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DateWindow {
    Bounded { start: NaiveDate, end: NaiveDate },
    Unbounded(UnboundedReason),
}

impl DateWindow {
    pub(crate) fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DateWindow::Bounded { start, end } => Some((*start, *end)),
            DateWindow::Unbounded(_) => None,
        }
    }

    pub(crate) fn is_unbounded(&self) -> bool {
        matches!(self, DateWindow::Unbounded(_))
    }

    /// Day-granularity inclusive test; an unbounded window contains every day
    pub(crate) fn contains(&self, day: NaiveDate) -> bool {
        match self {
            DateWindow::Bounded { start, end } => *start <= day && day <= *end,
            DateWindow::Unbounded(_) => true,
        }
    }

    /// Number of calendar days covered, counting both ends
    pub(crate) fn days(&self) -> Option<i64> {
        self.bounds()
            .map(|(start, end)| (end - start).num_days() + 1)
    }
}

/// Resolve a token against a reference instant.
///
/// Only the reference's own date components are used. Unknown tokens
/// resolve like `AllTime`, tagged so callers can tell the difference.
pub(crate) fn resolve_period(token: &PeriodToken, reference: NaiveDateTime) -> DateWindow {
    match token {
        PeriodToken::Known(period) => resolve(*period, reference.date()),
        PeriodToken::Unknown(raw) => {
            tracing::warn!(token = %raw, "unrecognized period, showing all time");
            DateWindow::Unbounded(UnboundedReason::UnknownPeriod(raw.clone()))
        }
    }
}

/// Resolve a known period relative to `today`
pub(crate) fn resolve(period: Period, today: NaiveDate) -> DateWindow {
    let (start, end) = match period {
        Period::AllTime => return DateWindow::Unbounded(UnboundedReason::AllTime),
        Period::Today => (today, today),
        Period::Yesterday => {
            let yesterday = days_before(today, 1);
            (yesterday, yesterday)
        }
        Period::Last7Days
        | Period::Last30Days
        | Period::Last90Days
        | Period::Last180Days
        | Period::Last365Days => {
            let n = period.trailing_days().unwrap_or(1);
            (days_before(today, n - 1), today)
        }
        Period::ThisMonth => (month_start(today), today),
        Period::PreviousMonth => {
            let last = days_before(month_start(today), 1);
            (month_start(last), last)
        }
        Period::ThisYear => (year_start(today), today),
        Period::PreviousYear => {
            let last = days_before(year_start(today), 1);
            (year_start(last), last)
        }
    };
    DateWindow::Bounded { start, end }
}

/// Saturates at the earliest representable date
fn days_before(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    days_before(date, u64::from(date.day0()))
}

fn year_start(date: NaiveDate) -> NaiveDate {
    days_before(date, u64::from(date.ordinal0()))
}
