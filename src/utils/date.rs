use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn date_key(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM` key of the month owning `d`.
pub fn year_month_of(d: NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

/// First day of a `YYYY-MM` key.
pub fn parse_year_month(ym: &str) -> AppResult<NaiveDate> {
    let ym = ym.trim();
    if ym.len() != 7 {
        return Err(AppError::InvalidYearMonth(ym.to_string()));
    }
    NaiveDate::parse_from_str(&format!("{ym}-01"), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidYearMonth(ym.to_string()))
}

pub fn end_of_month(d: NaiveDate) -> NaiveDate {
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|first_next| first_next.pred_opt())
        .unwrap_or(d)
}

/// Inclusive first/last day of a `YYYY-MM` key.
pub fn month_bounds(ym: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = parse_year_month(ym)?;
    Ok((first, end_of_month(first)))
}

/// Every date in `[start, end]`, ascending. Empty when `end < start`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}
