//! Reporting time window and the text formats used for dates and timestamps.

use crate::error::{Result, SeedError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Output format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Output format for timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The generation window: `[start, end]` where `end` is the report date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// First instant of the window.
    pub start: NaiveDateTime,
    /// Report "today", the last instant an order may carry.
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Window of `days` days ending at midnight of `report_date`.
    pub fn ending_at(report_date: NaiveDate, days: i64) -> Result<Self> {
        if days < 0 {
            return Err(SeedError::generation(format!(
                "window length must be non-negative, got {} days",
                days
            )));
        }
        let end = report_date.and_time(NaiveTime::MIN);
        let start = day_span(days)
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or_else(|| {
                SeedError::generation(format!(
                    "a {} day window before {} is out of calendar range",
                    days, report_date
                ))
            })?;
        Ok(Self { start, end })
    }

    /// Calendar date of the window start.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Whole days between start and end.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Whether `ts` lies inside the window, both ends inclusive.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }
}

fn day_span(days: i64) -> Option<TimeDelta> {
    TimeDelta::try_days(days)
}

/// Shift a timestamp by whole days; fails outside the calendar range.
pub fn plus_days(ts: NaiveDateTime, days: i64) -> Result<NaiveDateTime> {
    day_span(days)
        .and_then(|span| ts.checked_add_signed(span))
        .ok_or_else(|| {
            SeedError::generation(format!("{} shifted by {} days is out of range", ts, days))
        })
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        let report = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let window = TimeWindow::ending_at(report, 365).unwrap();

        assert_eq!(window.start_date(), NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        assert_eq!(window.days(), 365);
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(plus_days(window.end, 1).unwrap()));
    }

    #[test]
    fn test_out_of_range_window_is_an_error() {
        let report = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let err = TimeWindow::ending_at(report, i64::MAX / 2).unwrap_err();
        assert!(matches!(err, SeedError::Generation(_)));
        assert!(TimeWindow::ending_at(report, -1).is_err());
    }

    #[test]
    fn test_plus_days_out_of_range_is_an_error() {
        let ts = NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(matches!(plus_days(ts, i64::MAX), Err(SeedError::Generation(_))));
        // In TimeDelta range but past the last representable date
        assert!(plus_days(ts, 200_000_000).is_err());
        assert_eq!(plus_days(ts, -1).unwrap().date(), NaiveDate::from_ymd_opt(2025, 8, 31).unwrap());
    }

    #[test]
    fn test_formats() {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_timestamp(ts), "2025-03-07 00:00:00");
        assert_eq!(format_date(ts.date()), "2025-03-07");
    }
}
