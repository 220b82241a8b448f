//! Break-period normalization and break-detail derivation.

use crate::models::attendance_day::AttendanceDay;
use crate::models::break_period::{BreakPeriod, BreakSchedule};
use crate::utils::time::{is_valid_time_token, non_negative_minutes, token_to_minutes};
use crate::utils::workday::is_non_working_day;
use chrono::NaiveDate;

/// Maximum number of break periods kept per day.
pub const MAX_BREAK_SLOTS: usize = 5;

/// Trim, validate, sort and cap a raw list of break periods.
///
/// - drops entries with an invalid token or `end <= start`
/// - sorts by start minute (stable on ties)
/// - keeps the first [`MAX_BREAK_SLOTS`] entries
pub fn sanitize_break_periods(raw: &[BreakPeriod]) -> Vec<BreakPeriod> {
    let mut out: Vec<(i64, BreakPeriod)> = raw
        .iter()
        .filter_map(|p| {
            let start = p.start.trim();
            let end = p.end.trim();
            if !is_valid_time_token(start) || !is_valid_time_token(end) {
                return None;
            }
            let s = token_to_minutes(start)?;
            let e = token_to_minutes(end)?;
            (e > s).then(|| (s, BreakPeriod::new(start, end)))
        })
        .collect();

    out.sort_by_key(|(start, _)| *start);
    out.truncate(MAX_BREAK_SLOTS);
    out.into_iter().map(|(_, p)| p).collect()
}

/// Flat sum of `end - start` over the valid periods, no span clamping.
pub fn nominal_break_minutes(periods: &[BreakPeriod]) -> i64 {
    periods
        .iter()
        .filter_map(|p| Some((p.end_minutes()? - p.start_minutes()?).max(0)))
        .sum()
}

/// Caller-supplied changes to a day's break data.
#[derive(Debug, Clone, Default)]
pub struct BreakOverrides {
    /// `Some(vec![])` explicitly clears the periods.
    pub break_periods: Option<Vec<BreakPeriod>>,
    pub break_minutes: Option<i64>,
}

/// Break data to store on a day before any span-based deduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakDetails {
    pub break_periods: BreakSchedule,
    pub break_minutes: i64,
}

/// Resolve which break data a day carries after a write.
///
/// In order: explicit override periods (nominal minutes, or the flat
/// override when they are cleared); an explicit flat override, which
/// replaces any periods; the day's own periods; the user's default
/// periods; the day's stored flat value; 0.
pub fn derive_break_details(
    existing: Option<&AttendanceDay>,
    overrides: &BreakOverrides,
    default_periods: &BreakSchedule,
) -> BreakDetails {
    if let Some(raw) = &overrides.break_periods {
        let break_periods = BreakSchedule::normalize(raw);
        let break_minutes = if break_periods.is_empty() {
            non_negative_minutes(overrides.break_minutes)
        } else {
            break_periods.nominal_minutes()
        };
        return BreakDetails {
            break_periods,
            break_minutes,
        };
    }

    if overrides.break_minutes.is_some() {
        return BreakDetails {
            break_periods: BreakSchedule::empty(),
            break_minutes: non_negative_minutes(overrides.break_minutes),
        };
    }

    let break_periods = match existing {
        Some(day) if !day.break_periods.is_empty() => day.break_periods.clone(),
        _ => default_periods.clone(),
    };
    let break_minutes = if break_periods.is_empty() {
        non_negative_minutes(existing.and_then(|d| d.break_minutes))
    } else {
        break_periods.nominal_minutes()
    };

    BreakDetails {
        break_periods,
        break_minutes,
    }
}

/// Break minutes to show for a day in listings.
///
/// Days with both clock times show their stored break. Otherwise weekends
/// and holidays show 0, so schedule placeholders on days off read as no
/// break; other days show whatever is stored.
pub fn resolve_display_break_minutes(
    work_date: NaiveDate,
    day: Option<&AttendanceDay>,
    holidays: &[NaiveDate],
) -> Option<i64> {
    match day {
        Some(d) if d.clock_in.is_some() && d.clock_out.is_some() => {
            Some(d.break_minutes.unwrap_or(0))
        }
        _ if is_non_working_day(work_date, holidays) => Some(0),
        _ => day.and_then(|d| d.break_minutes),
    }
}
