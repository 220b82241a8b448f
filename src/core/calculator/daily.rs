//! Per-day worked / overtime minutes.

use super::deduction::calculate_deductible_break_minutes;
use crate::models::break_period::BreakSchedule;
use crate::utils::time::minutes_between;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// Worked minutes: span minus the effective break, never negative.
pub fn calculate_daily_minutes(
    clock_in: NaiveDateTime,
    clock_out: NaiveDateTime,
    effective_break_minutes: i64,
) -> i64 {
    (minutes_between(clock_in, clock_out) - effective_break_minutes).max(0)
}

/// Minutes beyond `threshold`, never negative.
pub fn calculate_overtime_minutes(total_minutes: i64, threshold: i64) -> i64 {
    (total_minutes - threshold).max(0)
}

/// Display-only estimate for a day still in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeTotals {
    pub work_minutes: i64,
    pub overtime_minutes: i64,
}

/// Estimate using `now` as a synthetic clock-out.
pub fn calculate_realtime_totals_at(
    clock_in: Option<NaiveDateTime>,
    break_minutes: Option<i64>,
    break_periods: &BreakSchedule,
    now: NaiveDateTime,
    threshold: i64,
) -> RealtimeTotals {
    let Some(clock_in) = clock_in else {
        return RealtimeTotals::default();
    };

    let effective =
        calculate_deductible_break_minutes(Some(clock_in), Some(now), break_minutes, break_periods);
    let work_minutes = calculate_daily_minutes(clock_in, now, effective);

    RealtimeTotals {
        work_minutes,
        overtime_minutes: calculate_overtime_minutes(work_minutes, threshold),
    }
}

/// Same as [`calculate_realtime_totals_at`] with the local wall clock. Not cached.
pub fn calculate_realtime_totals(
    clock_in: Option<NaiveDateTime>,
    break_minutes: Option<i64>,
    break_periods: &BreakSchedule,
    threshold: i64,
) -> RealtimeTotals {
    calculate_realtime_totals_at(
        clock_in,
        break_minutes,
        break_periods,
        Local::now().naive_local(),
        threshold,
    )
}
