use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use dealerdesk_core::window::{
    Clock, FixedClock, SystemClock, coerce_period, format_period, period_bounds, window_from_query,
};

use super::load_config;

pub fn run(base_dir: &Path, days: Option<&str>, months: Option<&str>, at: Option<&str>) -> Result<()> {
    let config = load_config(base_dir)?;

    let fixed;
    let clock: &dyn Clock = match at {
        Some(raw) => {
            let now = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("invalid --at instant: {raw}"))?
                .with_timezone(&Utc);
            fixed = FixedClock(now);
            &fixed
        }
        None => &SystemClock,
    };

    let window = window_from_query(clock, days, months, &config.reporting)?;
    println!("start: {}", window.start.to_rfc3339());
    println!("end:   {}", window.end.to_rfc3339());
    Ok(())
}

pub fn period(year: &str, month: &str) -> Result<()> {
    let (year, month) = coerce_period(year, month)?;
    let label = format_period(year, month)?;
    let bounds = period_bounds(year, month)?;
    println!("{label}");
    println!("start: {}", bounds.start.to_rfc3339());
    println!("end:   {}", bounds.end.to_rfc3339());
    Ok(())
}
