//! Server-side consistency paths: the per-write trigger and the nightly
//! rebuild. Both re-derive through [`Core::recompute_day`] and
//! [`rebuild_monthly_summary`], the same code the interactive commands use,
//! so running them after (or instead of) a command converges to the same data.

use crate::core::logic::Core;
use crate::core::summary::rebuild_monthly_summary;
use crate::db::store::AttendanceStore;
use crate::errors::AppResult;
use crate::models::attendance_day::AttendanceDay;
use crate::models::monthly_summary::MonthlySummary;
use crate::models::user::Role;
use crate::utils::date::year_month_of;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// One day-record write as seen by the trigger: `after == None` is a delete.
#[derive(Debug, Clone, PartialEq)]
pub struct DayChange {
    pub user_id: String,
    pub work_date: NaiveDate,
    pub before: Option<AttendanceDay>,
    pub after: Option<AttendanceDay>,
}

impl DayChange {
    pub fn year_month(&self) -> String {
        year_month_of(self.work_date)
    }
}

#[derive(Debug, Clone)]
pub struct TriggerOutcome {
    /// The stored record disagreed with the recomputation and was rewritten.
    pub corrected: bool,
    pub summary: MonthlySummary,
}

/// React to a write of `users/{user}/attendance/{date}`.
///
/// Deletes only rebuild the month. Otherwise the stored record is
/// re-derived from its raw fields, rewritten if any derived field differs
/// (that rewrite does not fire the trigger again), and the month rebuilt.
pub fn on_attendance_write(
    store: &mut impl AttendanceStore,
    change: &DayChange,
    threshold: i64,
) -> AppResult<TriggerOutcome> {
    let ym = change.year_month();

    let Some(after) = &change.after else {
        debug!(user = %change.user_id, date = %change.work_date, "day deleted, rebuilding month");
        let summary = rebuild_monthly_summary(store, &change.user_id, &ym)?;
        return Ok(TriggerOutcome {
            corrected: false,
            summary,
        });
    };

    let mut day = after.clone();
    let corrected = Core::recompute_day(&mut day, threshold);

    if corrected {
        warn!(
            user = %change.user_id,
            date = %change.work_date,
            "stored totals disagreed with recomputation, rewriting"
        );
        day.touch();
        store.save_day(&day)?;
    }

    let summary = rebuild_monthly_summary(store, &change.user_id, &ym)?;
    Ok(TriggerOutcome { corrected, summary })
}

/// Feed every change of a command through the trigger.
pub fn dispatch_changes(
    store: &mut impl AttendanceStore,
    changes: &[DayChange],
    threshold: i64,
) -> AppResult<usize> {
    let mut corrected = 0;
    for change in changes {
        if on_attendance_write(store, change, threshold)?.corrected {
            corrected += 1;
        }
    }
    Ok(corrected)
}

/// Scheduled backstop: rebuild the month containing `executed_on` for every employee.
pub fn nightly_rebuild(
    store: &mut impl AttendanceStore,
    executed_on: NaiveDate,
) -> AppResult<Vec<MonthlySummary>> {
    let ym = year_month_of(executed_on);
    let employees = store.list_users(Some(Role::Employee))?;

    let mut out = Vec::with_capacity(employees.len());
    for user in &employees {
        out.push(rebuild_monthly_summary(store, &user.id, &ym)?);
    }

    info!(month = %ym, employees = employees.len(), "nightly summary rebuild completed");
    store.audit(
        "nightly",
        &ym,
        &format!("Rebuilt {} monthly summaries", employees.len()),
    )?;

    Ok(out)
}
