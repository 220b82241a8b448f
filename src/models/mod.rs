pub mod attendance_day;
pub mod break_period;
pub mod day_status;
pub mod default_schedule;
pub mod monthly_summary;
pub mod user;
pub mod weekly_report;
