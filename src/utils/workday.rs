use chrono::{Datelike, NaiveDate, Weekday};

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Saturday, Sunday or one of the configured holidays.
pub fn is_non_working_day(date: NaiveDate, holidays: &[NaiveDate]) -> bool {
    is_weekend(date) || holidays.contains(&date)
}
