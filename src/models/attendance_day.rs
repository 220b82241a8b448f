use super::{break_period::BreakSchedule, day_status::DayStatus};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One attendance record per `(user_id, work_date)`.
///
/// `total_minutes` / `overtime_minutes` are derived and stay `None` until
/// the day has both clock times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDay {
    pub user_id: String,
    pub work_date: NaiveDate,
    pub clock_in: Option<NaiveDateTime>,
    pub clock_out: Option<NaiveDateTime>,
    pub break_minutes: Option<i64>,
    pub break_periods: BreakSchedule,
    pub work_description: String,
    pub total_minutes: Option<i64>,
    pub overtime_minutes: Option<i64>,
    pub status: DayStatus,
    pub updated_at: String,
}

impl AttendanceDay {
    /// Empty record (no clock times, no break data) for `work_date`.
    pub fn new(user_id: &str, work_date: NaiveDate) -> Self {
        Self {
            user_id: user_id.to_string(),
            work_date,
            clock_in: None,
            clock_out: None,
            break_minutes: None,
            break_periods: BreakSchedule::empty(),
            work_description: String::new(),
            total_minutes: None,
            overtime_minutes: None,
            status: DayStatus::Pending,
            updated_at: Local::now().to_rfc3339(),
        }
    }

    /// Placeholder carrying only a break schedule, created ahead of any clock event.
    pub fn shell(user_id: &str, work_date: NaiveDate, periods: BreakSchedule) -> Self {
        let mut day = Self::new(user_id, work_date);
        day.break_minutes = Some(periods.nominal_minutes());
        day.break_periods = periods;
        day
    }

    /// Status implied by the clock fields.
    pub fn derived_status(&self) -> DayStatus {
        match (self.clock_in, self.clock_out) {
            (Some(_), Some(_)) => DayStatus::Completed,
            (Some(_), None) => DayStatus::Working,
            _ => DayStatus::Pending,
        }
    }

    pub fn year_month(&self) -> String {
        self.work_date.format("%Y-%m").to_string()
    }

    pub fn date_str(&self) -> String {
        self.work_date.format("%Y-%m-%d").to_string()
    }

    pub fn touch(&mut self) {
        self.updated_at = Local::now().to_rfc3339();
    }
}
