//! Time utilities: HH:MM tokens, minute-of-day conversions, formatting minutes, etc.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-1]\d|2[0-3]):([0-5]\d)$").expect("valid time regex"));

/// `true` when `s` is a 24h `HH:MM` token between 00:00 and 23:59.
pub fn is_valid_time_token(s: &str) -> bool {
    TIME_TOKEN.is_match(s)
}

/// Minute of day (0..=1439) for a valid token, `None` otherwise.
pub fn token_to_minutes(s: &str) -> Option<i64> {
    let caps = TIME_TOKEN.captures(s)?;
    let hours: i64 = caps[1].parse().ok()?;
    let minutes: i64 = caps[2].parse().ok()?;
    Some(hours * 60 + minutes)
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let mins = token_to_minutes(t.trim())?;
    NaiveTime::from_hms_opt((mins / 60) as u32, (mins % 60) as u32, 0)
}

/// Build the wall-clock instant for `token` on `work_date`.
/// `label` names the field in the error (e.g. "Clock-in time").
pub fn instant_on(work_date: NaiveDate, token: &str, label: &'static str) -> AppResult<NaiveDateTime> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::MissingTime(label));
    }
    let time = parse_time(token).ok_or_else(|| AppError::InvalidTime(token.to_string()))?;
    Ok(work_date.and_time(time))
}

/// Whole minutes from `start` to `end` (negative when `end` is earlier).
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes()
}

/// Lenient minute-count reader for untrusted input.
///
/// Absent, blank, unparseable or negative values all read as 0; fractional
/// values are truncated.
pub fn parse_optional_non_negative_int(value: Option<&str>) -> i64 {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };

    if let Ok(n) = raw.parse::<i64>() {
        return n.max(0);
    }

    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => f.trunc() as i64,
        _ => 0,
    }
}

/// Same rule as [`parse_optional_non_negative_int`] for already-typed values.
pub fn non_negative_minutes(value: Option<i64>) -> i64 {
    value.unwrap_or(0).max(0)
}

/// `8h05m`-style duration label; `-` for missing values.
pub fn minutes_to_duration(mins: Option<i64>) -> String {
    match mins {
        None => "-".to_string(),
        Some(m) => {
            let sign = if m < 0 { "-" } else { "" };
            let a = m.abs();
            format!("{}{}h{:02}m", sign, a / 60, a % 60)
        }
    }
}

pub fn format_instant(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
