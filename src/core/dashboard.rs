//! Administrator view: every user's status for a date plus month totals.

use crate::core::calculator::breaks::resolve_display_break_minutes;
use crate::core::calculator::daily::{RealtimeTotals, calculate_realtime_totals_at};
use crate::db::store::AttendanceStore;
use crate::errors::AppResult;
use crate::models::attendance_day::AttendanceDay;
use crate::models::break_period::BreakSchedule;
use crate::models::day_status::DayStatus;
use crate::models::user::User;
use crate::utils::date::year_month_of;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRow {
    pub user_id: String,
    pub name: String,
    pub department: String,
    pub work_date: NaiveDate,
    pub status: DayStatus,
    pub clock_in: Option<NaiveDateTime>,
    pub clock_out: Option<NaiveDateTime>,
    pub break_minutes: i64,
    pub break_periods: BreakSchedule,
    /// Stored totals, or the realtime estimate while working.
    pub total_minutes: i64,
    pub overtime_minutes: i64,
    pub realtime: Option<RealtimeTotals>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub working: usize,
    pub completed: usize,
    pub not_started: usize,
    pub with_overtime: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRow {
    pub user_id: String,
    pub name: String,
    pub department: String,
    pub total_minutes: i64,
    pub overtime_minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub work_date: NaiveDate,
    pub year_month: String,
    pub stats: DashboardStats,
    pub rows: Vec<StatusRow>,
    pub monthly: Vec<MonthlyRow>,
}

fn status_row(
    user: &User,
    work_date: NaiveDate,
    record: Option<&AttendanceDay>,
    now: NaiveDateTime,
    threshold: i64,
    holidays: &[NaiveDate],
) -> StatusRow {
    let status = record.map(|d| d.derived_status()).unwrap_or_default();

    let realtime = record
        .filter(|_| status == DayStatus::Working)
        .map(|d| {
            calculate_realtime_totals_at(d.clock_in, d.break_minutes, &d.break_periods, now, threshold)
        });

    let (total_minutes, overtime_minutes) = match (realtime, record) {
        (Some(rt), _) => (rt.work_minutes, rt.overtime_minutes),
        (None, Some(d)) => (
            d.total_minutes.unwrap_or(0),
            d.overtime_minutes.unwrap_or(0),
        ),
        (None, None) => (0, 0),
    };

    StatusRow {
        user_id: user.id.clone(),
        name: user.name.clone(),
        department: user.department.clone(),
        work_date,
        status,
        clock_in: record.and_then(|d| d.clock_in),
        clock_out: record.and_then(|d| d.clock_out),
        break_minutes: resolve_display_break_minutes(work_date, record, holidays).unwrap_or(0),
        break_periods: record.map(|d| d.break_periods.clone()).unwrap_or_default(),
        total_minutes,
        overtime_minutes,
        realtime,
    }
}

/// Build the dashboard for `work_date`, estimating in-progress days at `now`.
pub fn build_dashboard(
    store: &impl AttendanceStore,
    work_date: NaiveDate,
    now: NaiveDateTime,
    threshold: i64,
    holidays: &[NaiveDate],
) -> AppResult<Dashboard> {
    let users = store.list_users(None)?;
    let ym = year_month_of(work_date);

    let records: HashMap<String, AttendanceDay> = store
        .load_days_for_date(work_date)?
        .into_iter()
        .map(|d| (d.user_id.clone(), d))
        .collect();

    let mut rows: Vec<StatusRow> = users
        .iter()
        .map(|u| status_row(u, work_date, records.get(&u.id), now, threshold, holidays))
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.user_id.cmp(&b.user_id)));

    let stats = DashboardStats {
        total: rows.len(),
        working: rows.iter().filter(|r| r.status == DayStatus::Working).count(),
        completed: rows.iter().filter(|r| r.status == DayStatus::Completed).count(),
        not_started: rows.iter().filter(|r| r.status == DayStatus::Pending).count(),
        with_overtime: rows.iter().filter(|r| r.overtime_minutes > 0).count(),
    };

    let summaries: HashMap<String, (i64, i64)> = store
        .load_summaries_for_month(&ym)?
        .into_iter()
        .map(|s| (s.user_id, (s.total_minutes, s.overtime_minutes)))
        .collect();

    let mut monthly: Vec<MonthlyRow> = users
        .iter()
        .map(|u| {
            let (total, overtime) = summaries.get(&u.id).copied().unwrap_or((0, 0));
            MonthlyRow {
                user_id: u.id.clone(),
                name: u.name.clone(),
                department: u.department.clone(),
                total_minutes: total,
                overtime_minutes: overtime,
            }
        })
        .collect();
    monthly.sort_by(|a, b| {
        a.department
            .cmp(&b.department)
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(Dashboard {
        work_date,
        year_month: ym,
        stats,
        rows,
        monthly,
    })
}
