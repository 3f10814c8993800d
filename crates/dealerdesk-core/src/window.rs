//! Reporting windows.
//!
//! Report handlers turn a `days` or `months` query parameter into a lower bound
//! for their data query. All computations take "now" from a [`Clock`] so callers
//! that need reproducible output can pin it with [`FixedClock`].

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ReportingSettings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
}

pub type Result<T> = std::result::Result<T, WindowError>;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Behaviour of a month offset when the current day-of-month does not exist
/// in the target month (e.g. the 31st stepping back into April).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthRollback {
    /// Surplus days spill into the following month: Mar 31 − 1 month = Mar 3 (Mar 2 in leap years).
    #[default]
    Overflow,
    /// Day is clamped to the last day of the target month: Mar 31 − 1 month = Feb 28/29.
    Clamp,
}

/// Half-open reporting range `[start, end)`. Rolling windows end at the clock's now,
/// calendar periods at the first instant of the next month, so adjacent periods never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Window covering the last `days` days up to now.
    pub fn last_days(clock: &dyn Clock, days: u32) -> Result<Self> {
        let end = clock.now();
        let start = days_before(end, days)?;
        Ok(Self { start, end })
    }

    /// Window covering the last `months` calendar months up to now.
    pub fn last_months(clock: &dyn Clock, months: u32, rollback: MonthRollback) -> Result<Self> {
        let end = clock.now();
        let start = months_before(end, months, rollback)?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Now minus exactly `days` × 24h.
pub fn window_from_days(clock: &dyn Clock, days: u32) -> Result<DateTime<Utc>> {
    days_before(clock.now(), days)
}

/// Now with the month field moved back by `months`. Time of day is preserved.
pub fn window_from_months(
    clock: &dyn Clock,
    months: u32,
    rollback: MonthRollback,
) -> Result<DateTime<Utc>> {
    months_before(clock.now(), months, rollback)
}

fn days_before(now: DateTime<Utc>, days: u32) -> Result<DateTime<Utc>> {
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| WindowError::InvalidPeriod(format!("{days} days is out of range")))
}

fn months_before(now: DateTime<Utc>, months: u32, rollback: MonthRollback) -> Result<DateTime<Utc>> {
    let shifted = match rollback {
        MonthRollback::Clamp => now.checked_sub_months(Months::new(months)),
        MonthRollback::Overflow => overflow_sub_months(now, months),
    };
    shifted.ok_or_else(|| WindowError::InvalidPeriod(format!("{months} months is out of range")))
}

fn overflow_sub_months(now: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    let total = i64::from(now.year()) * 12 + i64::from(now.month0()) - i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    // Start from the 1st and add the remaining days so that a missing day rolls forward.
    let date = NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_days(Days::new(u64::from(now.day() - 1)))?;
    Some(date.and_time(now.time()).and_utc())
}

/// Coerce a raw query value into a non-negative offset.
///
/// Integers and finite decimals are accepted (decimals truncate toward zero),
/// negative values clamp to 0. Anything else is an invalid period.
pub fn coerce_offset(raw: &str) -> Result<u32> {
    let value = coerce_int(raw)?;
    u32::try_from(value.max(0))
        .map_err(|_| WindowError::InvalidPeriod(format!("offset too large: {raw:?}")))
}

/// Coerce a raw value into a signed integer. Finite decimals truncate toward zero.
pub fn coerce_int(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(v) => Ok(v),
        Err(_) => match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
            _ => {
                tracing::debug!(raw, "rejecting non-numeric period value");
                Err(WindowError::InvalidPeriod(format!("not a number: {raw:?}")))
            }
        },
    }
}

/// Year and month of a calendar period from raw input, e.g. CLI arguments.
pub fn coerce_period(year: &str, month: &str) -> Result<(i32, u32)> {
    let year = coerce_int(year)?;
    let month = coerce_int(month)?;
    let year = i32::try_from(year)
        .map_err(|_| WindowError::InvalidPeriod(format!("year out of range: {year}")))?;
    let month = u32::try_from(month)
        .map_err(|_| WindowError::InvalidPeriod(format!("month out of range: {month}")))?;
    check_period(year, month)?;
    Ok((year, month))
}

/// Build the window a report handler uses from its `days` / `months` query parameters.
///
/// `months` takes precedence when both are supplied; with neither, the configured
/// default day count applies.
pub fn window_from_query(
    clock: &dyn Clock,
    days: Option<&str>,
    months: Option<&str>,
    settings: &ReportingSettings,
) -> Result<DateWindow> {
    if let Some(raw) = months {
        return DateWindow::last_months(clock, coerce_offset(raw)?, settings.month_rollback);
    }
    let days = match days {
        Some(raw) => coerce_offset(raw)?,
        None => settings.default_days,
    };
    DateWindow::last_days(clock, days)
}

/// Render a calendar period as `YYYY-MM`.
pub fn format_period(year: i32, month: u32) -> Result<String> {
    check_period(year, month)?;
    Ok(format!("{year:04}-{month:02}"))
}

/// Parse a `YYYY-MM` period label.
pub fn parse_period(label: &str) -> Result<(i32, u32)> {
    let invalid = || WindowError::InvalidPeriod(format!("expected YYYY-MM, got {label:?}"));
    let (year, month) = label.trim().split_once('-').ok_or_else(invalid)?;
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 4 || !(1..=2).contains(&month.len()) || !digits(year) || !digits(month) {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    check_period(year, month)?;
    Ok((year, month))
}

/// The calendar month as a half-open window: first instant of the month up to
/// the first instant of the next one.
pub fn period_bounds(year: i32, month: u32) -> Result<DateWindow> {
    check_period(year, month)?;
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| WindowError::InvalidPeriod(format!("{year}-{month}")))?;
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| WindowError::InvalidPeriod(format!("{year}-{month}")))?;
    Ok(DateWindow {
        start: start.and_time(chrono::NaiveTime::MIN).and_utc(),
        end: end.and_time(chrono::NaiveTime::MIN).and_utc(),
    })
}

fn check_period(year: i32, month: u32) -> Result<()> {
    if !(0..=9999).contains(&year) {
        return Err(WindowError::InvalidPeriod(format!("year out of range: {year}")));
    }
    if !(1..=12).contains(&month) {
        return Err(WindowError::InvalidPeriod(format!("month out of range: {month}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap())
    }

    #[test]
    fn zero_days_is_now() {
        let clock = at(2024, 6, 15, 10, 30);
        assert_eq!(window_from_days(&clock, 0).unwrap(), clock.0);
    }

    #[test]
    fn thirty_days_is_exact_hours() {
        let clock = at(2024, 6, 15, 10, 30);
        let start = window_from_days(&clock, 30).unwrap();
        assert_eq!(clock.0 - start, Duration::hours(30 * 24));
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 16, 10, 30, 0).unwrap());
    }

    #[test]
    fn system_clock_zero_days_is_close_to_now() {
        let before = Utc::now();
        let start = window_from_days(&SystemClock, 0).unwrap();
        let after = Utc::now();
        assert!(before <= start && start <= after);
    }

    #[test]
    fn plain_month_step() {
        let clock = at(2024, 6, 15, 8, 0);
        let start = window_from_months(&clock, 1, MonthRollback::Overflow).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 15, 8, 0, 0).unwrap());
    }

    #[test]
    fn month_step_crosses_year() {
        let clock = at(2024, 2, 10, 0, 0);
        let start = window_from_months(&clock, 3, MonthRollback::Overflow).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2023, 11, 10, 0, 0, 0).unwrap());
        let start = window_from_months(&clock, 26, MonthRollback::Clamp).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2021, 12, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn day_31_overflows_into_following_month() {
        // May 31 − 1 month: April has 30 days, so the 31st spills to May 1.
        let clock = at(2024, 5, 31, 12, 0);
        let start = window_from_months(&clock, 1, MonthRollback::Overflow).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());

        let clock = at(2023, 3, 31, 12, 0);
        let start = window_from_months(&clock, 1, MonthRollback::Overflow).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2023, 3, 3, 12, 0, 0).unwrap());

        let clock = at(2024, 3, 31, 12, 0);
        let start = window_from_months(&clock, 1, MonthRollback::Overflow).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap());
    }

    #[test]
    fn day_31_clamps_to_month_end() {
        let clock = at(2024, 5, 31, 12, 0);
        let start = window_from_months(&clock, 1, MonthRollback::Clamp).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).unwrap());

        let clock = at(2024, 3, 31, 12, 0);
        let start = window_from_months(&clock, 1, MonthRollback::Clamp).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());
    }

    #[test]
    fn start_never_after_now() {
        let clock = at(2024, 1, 31, 23, 59);
        for n in 0..=24 {
            for rollback in [MonthRollback::Overflow, MonthRollback::Clamp] {
                let w = DateWindow::last_months(&clock, n, rollback).unwrap();
                assert!(w.start <= w.end, "n={n} {rollback:?}");
            }
            let w = DateWindow::last_days(&clock, n).unwrap();
            assert!(w.start <= w.end);
        }
    }

    #[test]
    fn huge_day_offset_is_invalid() {
        let clock = at(2024, 1, 1, 0, 0);
        assert!(matches!(
            window_from_days(&clock, u32::MAX),
            Err(WindowError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn coerce_offset_accepts_numbers() {
        assert_eq!(coerce_offset("30").unwrap(), 30);
        assert_eq!(coerce_offset(" 7 ").unwrap(), 7);
        assert_eq!(coerce_offset("2.9").unwrap(), 2);
        assert_eq!(coerce_offset("-5").unwrap(), 0);
    }

    #[test]
    fn coerce_period_keeps_sign() {
        assert_eq!(coerce_period("2024", "3").unwrap(), (2024, 3));
        assert_eq!(coerce_period(" 2024 ", "11.0").unwrap(), (2024, 11));
        assert!(matches!(coerce_period("-5", "3"), Err(WindowError::InvalidPeriod(_))));
        assert!(coerce_period("2024", "-1").is_err());
        assert!(coerce_period("2024", "13").is_err());
        assert!(coerce_period("99999999999", "1").is_err());
    }

    #[test]
    fn coerce_offset_rejects_garbage() {
        for raw in ["", "abc", "NaN", "inf", "30days", "99999999999"] {
            assert!(
                matches!(coerce_offset(raw), Err(WindowError::InvalidPeriod(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn query_prefers_months_then_days_then_default() {
        let clock = at(2024, 6, 15, 0, 0);
        let settings = ReportingSettings::default();

        let w = window_from_query(&clock, Some("7"), Some("1"), &settings).unwrap();
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap());

        let w = window_from_query(&clock, Some("7"), None, &settings).unwrap();
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap());

        let w = window_from_query(&clock, None, None, &settings).unwrap();
        assert_eq!(w.end - w.start, Duration::days(30));

        assert!(window_from_query(&clock, Some("x"), None, &settings).is_err());
    }

    #[test]
    fn format_period_pads_month() {
        assert_eq!(format_period(2024, 3).unwrap(), "2024-03");
        assert_eq!(format_period(2024, 11).unwrap(), "2024-11");
        assert!(format_period(2024, 0).is_err());
        assert!(format_period(2024, 13).is_err());
    }

    #[test]
    fn parse_period_label() {
        assert_eq!(parse_period("2024-03").unwrap(), (2024, 3));
        assert_eq!(parse_period("2024-3").unwrap(), (2024, 3));
        assert!(parse_period("24-03").is_err());
        assert!(parse_period("+024-03").is_err());
        assert!(parse_period("2024-+3").is_err());
        assert!(parse_period(" 2024-03").is_ok());
        assert!(parse_period("2024-13").is_err());
        assert!(parse_period("2024/03").is_err());
    }

    #[test]
    fn period_bounds_cover_calendar_month() {
        let w = period_bounds(2024, 2).unwrap();
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(w.end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

        let feb = period_bounds(2024, 2).unwrap();
        let mar = period_bounds(2024, 3).unwrap();
        let boundary = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert!(!feb.contains(boundary));
        assert!(mar.contains(boundary));
        assert!(feb.contains(boundary - Duration::seconds(1)));
        assert!(feb.contains(feb.start));

        let w = period_bounds(2023, 12).unwrap();
        assert_eq!(w.end, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }
}
