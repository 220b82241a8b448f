//! Minutes to deduct from a clock span for breaks.

use crate::models::break_period::BreakSchedule;
use crate::utils::time::{minutes_between, parse_time};
use chrono::NaiveDateTime;

/// Nominal break length: the flat value when present (floored at 0),
/// otherwise the flat sum of the periods, otherwise 0.
pub fn resolve_break_minutes(break_minutes: Option<i64>, break_periods: &BreakSchedule) -> i64 {
    match break_minutes {
        Some(m) => m.max(0),
        None if !break_periods.is_empty() => break_periods.nominal_minutes(),
        None => 0,
    }
}

/// Break minutes that actually fall inside `[clock_in, clock_out]`.
///
/// Periods are placed on clock-in's calendar date and intersected with the
/// span. Overlapping periods are summed as-is, so a region covered by two
/// periods is deducted twice. With no periods the flat `break_minutes` is
/// used. The result is always within `[0, span]`.
pub fn calculate_deductible_break_minutes(
    clock_in: Option<NaiveDateTime>,
    clock_out: Option<NaiveDateTime>,
    break_minutes: Option<i64>,
    break_periods: &BreakSchedule,
) -> i64 {
    let (Some(clock_in), Some(clock_out)) = (clock_in, clock_out) else {
        return resolve_break_minutes(break_minutes, break_periods);
    };

    let span = minutes_between(clock_in, clock_out).max(0);

    let deduction = if break_periods.is_empty() {
        resolve_break_minutes(break_minutes, &BreakSchedule::empty())
    } else {
        let date = clock_in.date();
        break_periods
            .periods()
            .iter()
            .filter_map(|p| {
                let start = date.and_time(parse_time(&p.start)?);
                let end = date.and_time(parse_time(&p.end)?);
                let overlap = minutes_between(start.max(clock_in), end.min(clock_out));
                (overlap > 0).then_some(overlap)
            })
            .sum()
    };

    deduction.clamp(0, span)
}
