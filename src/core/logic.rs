//! Shared recomputation used by every write path (interactive commands,
//! the write trigger and the nightly rebuild).

use crate::core::calculator::daily::{calculate_daily_minutes, calculate_overtime_minutes};
use crate::core::calculator::deduction::calculate_deductible_break_minutes;
use crate::models::attendance_day::AttendanceDay;

pub struct Core;

impl Core {
    /// Re-derive status, break minutes and totals of `day` in place.
    ///
    /// Completed days get their deductible break and totals; other days get
    /// `None` totals. When the day has periods, `break_minutes` mirrors them
    /// (deductible once completed, nominal otherwise); a flat value is kept
    /// as entered. Returns `true` when any derived field changed.
    pub fn recompute_day(day: &mut AttendanceDay, threshold: i64) -> bool {
        let before = (
            day.status,
            day.break_minutes,
            day.total_minutes,
            day.overtime_minutes,
        );

        match (day.clock_in, day.clock_out) {
            (Some(clock_in), Some(clock_out)) => {
                let effective = calculate_deductible_break_minutes(
                    Some(clock_in),
                    Some(clock_out),
                    day.break_minutes,
                    &day.break_periods,
                );
                let total = calculate_daily_minutes(clock_in, clock_out, effective);

                if !day.break_periods.is_empty() {
                    day.break_minutes = Some(effective);
                }
                day.total_minutes = Some(total);
                day.overtime_minutes = Some(calculate_overtime_minutes(total, threshold));
            }
            _ => {
                if !day.break_periods.is_empty() {
                    day.break_minutes = Some(day.break_periods.nominal_minutes());
                }
                day.total_minutes = None;
                day.overtime_minutes = None;
            }
        }

        day.status = day.derived_status();

        before
            != (
                day.status,
                day.break_minutes,
                day.total_minutes,
                day.overtime_minutes,
            )
    }
}
