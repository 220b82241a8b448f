use crate::errors::{AppError, AppResult};
use crate::models::attendance_day::AttendanceDay;
use crate::models::break_period::{BreakPeriod, BreakSchedule};
use crate::models::day_status::DayStatus;
use crate::models::default_schedule::DefaultBreakSchedule;
use crate::models::monthly_summary::MonthlySummary;
use crate::models::user::{Role, User};
use crate::models::weekly_report::{ReportStatus, WeeklyReport};
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

const INSTANT_FMT: &str = "%Y-%m-%d %H:%M";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

fn date_to_sql(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn instant_to_sql(v: Option<NaiveDateTime>) -> Option<String> {
    v.map(|dt| dt.format(INSTANT_FMT).to_string())
}

fn parse_instant(col: usize, v: Option<String>) -> rusqlite::Result<Option<NaiveDateTime>> {
    v.map(|s| {
        NaiveDateTime::parse_from_str(&s, INSTANT_FMT)
            .map_err(|_| conversion_error(col, AppError::InvalidTime(s.clone())))
    })
    .transpose()
}

fn periods_from_sql(col: usize, raw: &str) -> rusqlite::Result<BreakSchedule> {
    let list: Vec<BreakPeriod> = serde_json::from_str(raw)
        .map_err(|e| conversion_error(col, AppError::InvalidBreakPeriod(e.to_string())))?;
    Ok(BreakSchedule::normalize(&list))
}

fn periods_to_sql(s: &BreakSchedule) -> AppResult<String> {
    Ok(serde_json::to_string(s)?)
}

// ---------------------------
// Attendance
// ---------------------------

const DAY_COLUMNS: &str = "user_id, work_date, clock_in, clock_out, break_minutes, break_periods,
     work_description, total_minutes, overtime_minutes, status, updated_at";

pub fn map_day(row: &Row) -> rusqlite::Result<AttendanceDay> {
    let date_str: String = row.get("work_date")?;
    let work_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(1, AppError::InvalidDate(date_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = DayStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(9, AppError::Other(format!("Invalid status: {status_str}"))))?;

    let periods: String = row.get("break_periods")?;

    Ok(AttendanceDay {
        user_id: row.get("user_id")?,
        work_date,
        clock_in: parse_instant(2, row.get("clock_in")?)?,
        clock_out: parse_instant(3, row.get("clock_out")?)?,
        break_minutes: row.get("break_minutes")?,
        break_periods: periods_from_sql(5, &periods)?,
        work_description: row.get("work_description")?,
        total_minutes: row.get("total_minutes")?,
        overtime_minutes: row.get("overtime_minutes")?,
        status,
        updated_at: row.get("updated_at")?,
    })
}

pub fn load_day(conn: &Connection, user_id: &str, date: NaiveDate) -> AppResult<Option<AttendanceDay>> {
    let sql = format!("SELECT {DAY_COLUMNS} FROM attendance WHERE user_id = ?1 AND work_date = ?2");
    let day = conn
        .query_row(&sql, params![user_id, date_to_sql(date)], map_day)
        .optional()?;
    Ok(day)
}

/// Days of one user in `[from, to]`, ordered by work date.
pub fn load_days_in_range(
    conn: &Connection,
    user_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<AttendanceDay>> {
    let sql = format!(
        "SELECT {DAY_COLUMNS} FROM attendance
         WHERE user_id = ?1 AND work_date BETWEEN ?2 AND ?3
         ORDER BY work_date ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id, date_to_sql(from), date_to_sql(to)], map_day)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every user's record for `date`.
pub fn load_days_for_date(conn: &Connection, date: NaiveDate) -> AppResult<Vec<AttendanceDay>> {
    let sql = format!(
        "SELECT {DAY_COLUMNS} FROM attendance WHERE work_date = ?1 ORDER BY clock_in ASC, user_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([date_to_sql(date)], map_day)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert or overwrite a day (created_at is kept on overwrite).
pub fn upsert_day(conn: &Connection, day: &AttendanceDay) -> AppResult<()> {
    conn.execute(
        "INSERT INTO attendance (user_id, work_date, clock_in, clock_out, break_minutes, break_periods,
                                 work_description, total_minutes, overtime_minutes, status,
                                 created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
         ON CONFLICT(user_id, work_date) DO UPDATE SET
             clock_in = excluded.clock_in,
             clock_out = excluded.clock_out,
             break_minutes = excluded.break_minutes,
             break_periods = excluded.break_periods,
             work_description = excluded.work_description,
             total_minutes = excluded.total_minutes,
             overtime_minutes = excluded.overtime_minutes,
             status = excluded.status,
             updated_at = excluded.updated_at",
        params![
            day.user_id,
            date_to_sql(day.work_date),
            instant_to_sql(day.clock_in),
            instant_to_sql(day.clock_out),
            day.break_minutes,
            periods_to_sql(&day.break_periods)?,
            day.work_description,
            day.total_minutes,
            day.overtime_minutes,
            day.status.to_db_str(),
            day.updated_at,
        ],
    )?;
    Ok(())
}

pub fn delete_day(conn: &Connection, user_id: &str, date: NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM attendance WHERE user_id = ?1 AND work_date = ?2",
        params![user_id, date_to_sql(date)],
    )?;
    Ok(n)
}

// ---------------------------
// Monthly summaries
// ---------------------------

fn map_summary(row: &Row) -> rusqlite::Result<MonthlySummary> {
    Ok(MonthlySummary {
        user_id: row.get("user_id")?,
        year_month: row.get("year_month")?,
        total_minutes: row.get("total_minutes")?,
        overtime_minutes: row.get("overtime_minutes")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn load_summary(conn: &Connection, user_id: &str, ym: &str) -> AppResult<Option<MonthlySummary>> {
    let s = conn
        .query_row(
            "SELECT user_id, year_month, total_minutes, overtime_minutes, updated_at
             FROM monthly_summary WHERE user_id = ?1 AND year_month = ?2",
            params![user_id, ym],
            map_summary,
        )
        .optional()?;
    Ok(s)
}

pub fn load_summaries_for_month(conn: &Connection, ym: &str) -> AppResult<Vec<MonthlySummary>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, year_month, total_minutes, overtime_minutes, updated_at
         FROM monthly_summary WHERE year_month = ?1 ORDER BY user_id ASC",
    )?;
    let rows = stmt.query_map([ym], map_summary)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn upsert_summary(conn: &Connection, s: &MonthlySummary) -> AppResult<()> {
    conn.execute(
        "INSERT INTO monthly_summary (user_id, year_month, total_minutes, overtime_minutes, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(user_id, year_month) DO UPDATE SET
             total_minutes = excluded.total_minutes,
             overtime_minutes = excluded.overtime_minutes,
             updated_at = excluded.updated_at",
        params![
            s.user_id,
            s.year_month,
            s.total_minutes,
            s.overtime_minutes,
            s.updated_at
        ],
    )?;
    Ok(())
}

// ---------------------------
// Default break schedules
// ---------------------------

pub fn load_default_schedule(conn: &Connection, user_id: &str) -> AppResult<DefaultBreakSchedule> {
    let row: Option<(String, Option<String>)> = conn
        .query_row(
            "SELECT periods, effective_from FROM break_schedules WHERE user_id = ?1",
            [user_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let Some((periods, effective_from)) = row else {
        return Ok(DefaultBreakSchedule::default());
    };

    let effective_from = effective_from
        .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s)))
        .transpose()?;

    Ok(DefaultBreakSchedule {
        periods: periods_from_sql(0, &periods)?,
        effective_from,
    })
}

pub fn upsert_default_schedule(
    conn: &Connection,
    user_id: &str,
    schedule: &DefaultBreakSchedule,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO break_schedules (user_id, periods, effective_from, updated_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user_id) DO UPDATE SET
             periods = excluded.periods,
             effective_from = excluded.effective_from,
             updated_at = excluded.updated_at",
        params![
            user_id,
            periods_to_sql(&schedule.periods)?,
            schedule.effective_from.map(date_to_sql),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

// ---------------------------
// Users
// ---------------------------

fn map_user(row: &Row) -> rusqlite::Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidRole(role_str.clone())))?;
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        department: row.get("department")?,
        role,
    })
}

pub fn load_user(conn: &Connection, user_id: &str) -> AppResult<Option<User>> {
    let u = conn
        .query_row(
            "SELECT id, name, department, role FROM users WHERE id = ?1",
            [user_id],
            map_user,
        )
        .optional()?;
    Ok(u)
}

/// Users ordered by name, optionally restricted to one role.
pub fn list_users(conn: &Connection, role: Option<Role>) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, department, role FROM users
         WHERE ?1 IS NULL OR role = ?1
         ORDER BY name ASC, id ASC",
    )?;
    let rows = stmt.query_map([role.map(|r| r.to_db_str())], map_user)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn upsert_user(conn: &Connection, user: &User) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (id, name, department, role, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             department = excluded.department,
             role = excluded.role",
        params![
            user.id,
            user.name,
            user.department,
            user.role.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

// ---------------------------
// Weekly reports
// ---------------------------

const REPORT_COLUMNS: &str =
    "user_id, report_id, start_date, end_date, week, content, status, submitted_at, updated_at";

fn map_report(row: &Row) -> rusqlite::Result<WeeklyReport> {
    let parse = |col: usize, name: &str| -> rusqlite::Result<NaiveDate> {
        let raw: String = row.get(name)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| conversion_error(col, AppError::InvalidDate(raw.clone())))
    };

    let status_str: String = row.get("status")?;
    let status = ReportStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(6, AppError::Other(format!("Invalid report status: {status_str}")))
    })?;

    Ok(WeeklyReport {
        user_id: row.get("user_id")?,
        id: row.get("report_id")?,
        start: parse(2, "start_date")?,
        end: parse(3, "end_date")?,
        week: row.get("week")?,
        content: row.get("content")?,
        status,
        submitted_at: row.get("submitted_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn load_report(conn: &Connection, user_id: &str, report_id: &str) -> AppResult<Option<WeeklyReport>> {
    let sql = format!("SELECT {REPORT_COLUMNS} FROM weekly_reports WHERE user_id = ?1 AND report_id = ?2");
    let r = conn
        .query_row(&sql, params![user_id, report_id], map_report)
        .optional()?;
    Ok(r)
}

/// Newest week first, optionally for one user.
pub fn list_reports(conn: &Connection, user_id: Option<&str>) -> AppResult<Vec<WeeklyReport>> {
    let sql = format!(
        "SELECT {REPORT_COLUMNS} FROM weekly_reports
         WHERE ?1 IS NULL OR user_id = ?1
         ORDER BY start_date DESC, user_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([user_id], map_report)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn upsert_report(conn: &Connection, report: &WeeklyReport) -> AppResult<()> {
    conn.execute(
        "INSERT INTO weekly_reports (user_id, report_id, start_date, end_date, week, content,
                                     status, submitted_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(user_id, report_id) DO UPDATE SET
             content = excluded.content,
             status = excluded.status,
             submitted_at = excluded.submitted_at,
             updated_at = excluded.updated_at",
        params![
            report.user_id,
            report.id,
            date_to_sql(report.start),
            date_to_sql(report.end),
            report.week,
            report.content,
            report.status.to_db_str(),
            report.submitted_at,
            report.updated_at,
        ],
    )?;
    Ok(())
}
