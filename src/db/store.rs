//! Persistence boundary of the attendance engine.
//!
//! The engine only talks to storage through [`AttendanceStore`]; `DbPool`
//! is the SQLite implementation.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::attendance_day::AttendanceDay;
use crate::models::default_schedule::DefaultBreakSchedule;
use crate::models::monthly_summary::MonthlySummary;
use crate::models::user::{Role, User};
use crate::models::weekly_report::WeeklyReport;
use chrono::NaiveDate;

pub trait AttendanceStore {
    fn load_day(&self, user_id: &str, date: NaiveDate) -> AppResult<Option<AttendanceDay>>;

    fn save_day(&mut self, day: &AttendanceDay) -> AppResult<()>;

    /// Returns `true` when a record was removed.
    fn delete_day(&mut self, user_id: &str, date: NaiveDate) -> AppResult<bool>;

    /// Inclusive range, ordered by work date.
    fn load_days_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceDay>>;

    /// All-or-nothing write of several days.
    fn save_days_atomic(&mut self, days: &[AttendanceDay]) -> AppResult<()>;

    /// Records of every user for one date.
    fn load_days_for_date(&self, date: NaiveDate) -> AppResult<Vec<AttendanceDay>>;

    fn load_summary(&self, user_id: &str, year_month: &str) -> AppResult<Option<MonthlySummary>>;

    fn save_summary(&mut self, summary: &MonthlySummary) -> AppResult<()>;

    fn load_summaries_for_month(&self, year_month: &str) -> AppResult<Vec<MonthlySummary>>;

    fn load_default_schedule(&self, user_id: &str) -> AppResult<DefaultBreakSchedule>;

    fn save_default_schedule(
        &mut self,
        user_id: &str,
        schedule: &DefaultBreakSchedule,
    ) -> AppResult<()>;

    fn load_user(&self, user_id: &str) -> AppResult<Option<User>>;

    fn list_users(&self, role: Option<Role>) -> AppResult<Vec<User>>;

    fn save_user(&mut self, user: &User) -> AppResult<()>;

    fn load_report(&self, user_id: &str, report_id: &str) -> AppResult<Option<WeeklyReport>>;

    /// Newest week first; `None` lists every user's reports.
    fn list_reports(&self, user_id: Option<&str>) -> AppResult<Vec<WeeklyReport>>;

    fn save_report(&mut self, report: &WeeklyReport) -> AppResult<()>;

    /// Append a line to the audit trail.
    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()>;
}

impl AttendanceStore for DbPool {
    fn load_day(&self, user_id: &str, date: NaiveDate) -> AppResult<Option<AttendanceDay>> {
        queries::load_day(&self.conn, user_id, date)
    }

    fn save_day(&mut self, day: &AttendanceDay) -> AppResult<()> {
        queries::upsert_day(&self.conn, day)
    }

    fn delete_day(&mut self, user_id: &str, date: NaiveDate) -> AppResult<bool> {
        Ok(queries::delete_day(&self.conn, user_id, date)? > 0)
    }

    fn load_days_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceDay>> {
        queries::load_days_in_range(&self.conn, user_id, from, to)
    }

    fn save_days_atomic(&mut self, days: &[AttendanceDay]) -> AppResult<()> {
        let tx = self.conn.transaction()?;
        for day in days {
            queries::upsert_day(&tx, day)?;
        }
        // dropping `tx` on an error above rolls the whole batch back
        tx.commit()?;
        Ok(())
    }

    fn load_days_for_date(&self, date: NaiveDate) -> AppResult<Vec<AttendanceDay>> {
        queries::load_days_for_date(&self.conn, date)
    }

    fn load_summary(&self, user_id: &str, year_month: &str) -> AppResult<Option<MonthlySummary>> {
        queries::load_summary(&self.conn, user_id, year_month)
    }

    fn save_summary(&mut self, summary: &MonthlySummary) -> AppResult<()> {
        queries::upsert_summary(&self.conn, summary)
    }

    fn load_summaries_for_month(&self, year_month: &str) -> AppResult<Vec<MonthlySummary>> {
        queries::load_summaries_for_month(&self.conn, year_month)
    }

    fn load_default_schedule(&self, user_id: &str) -> AppResult<DefaultBreakSchedule> {
        queries::load_default_schedule(&self.conn, user_id)
    }

    fn save_default_schedule(
        &mut self,
        user_id: &str,
        schedule: &DefaultBreakSchedule,
    ) -> AppResult<()> {
        queries::upsert_default_schedule(&self.conn, user_id, schedule)
    }

    fn load_user(&self, user_id: &str) -> AppResult<Option<User>> {
        queries::load_user(&self.conn, user_id)
    }

    fn list_users(&self, role: Option<Role>) -> AppResult<Vec<User>> {
        queries::list_users(&self.conn, role)
    }

    fn save_user(&mut self, user: &User) -> AppResult<()> {
        queries::upsert_user(&self.conn, user)
    }

    fn load_report(&self, user_id: &str, report_id: &str) -> AppResult<Option<WeeklyReport>> {
        queries::load_report(&self.conn, user_id, report_id)
    }

    fn list_reports(&self, user_id: Option<&str>) -> AppResult<Vec<WeeklyReport>> {
        queries::list_reports(&self.conn, user_id)
    }

    fn save_report(&mut self, report: &WeeklyReport) -> AppResult<()> {
        queries::upsert_report(&self.conn, report)
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.conn, operation, target, message)
    }
}
