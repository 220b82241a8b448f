use crate::models::attendance_day::AttendanceDay;
use crate::models::monthly_summary::MonthlySummary;
use chrono::Local;

/// Sum the stored totals of `days` into a summary for `year_month`.
/// Days without totals (in progress, pending, shells) contribute 0.
pub fn summarize_month(user_id: &str, year_month: &str, days: &[AttendanceDay]) -> MonthlySummary {
    let (total, overtime) = days
        .iter()
        .filter(|d| d.year_month() == year_month)
        .fold((0, 0), |(t, o), d| {
            (
                t + d.total_minutes.unwrap_or(0),
                o + d.overtime_minutes.unwrap_or(0),
            )
        });

    MonthlySummary {
        user_id: user_id.to_string(),
        year_month: year_month.to_string(),
        total_minutes: total,
        overtime_minutes: overtime,
        updated_at: Local::now().to_rfc3339(),
    }
}
