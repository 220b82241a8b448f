use crate::core::clock::require_user;
use crate::core::logic::Core;
use crate::core::summary::rebuild_monthly_summary;
use crate::core::trigger::DayChange;
use crate::db::store::AttendanceStore;
use crate::errors::AppResult;
use crate::models::attendance_day::AttendanceDay;
use crate::models::break_period::{BreakPeriod, BreakSchedule};
use crate::models::default_schedule::DefaultBreakSchedule;
use crate::models::monthly_summary::MonthlySummary;
use crate::utils::date::{date_key, days_in_range, end_of_month};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};
use tracing::info;

/// Result of a retroactive break-schedule update.
#[derive(Debug, Clone)]
pub struct ScheduleUpdate {
    pub periods: BreakSchedule,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Days that existed before the update and were rewritten.
    pub updated: usize,
    /// Day-shells created for dates without a record.
    pub created: usize,
    pub changes: Vec<DayChange>,
    pub summaries: Vec<MonthlySummary>,
}

pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Apply `raw_periods` to every day from `start` through the end of its
    /// month and make them the user's default from `start` on.
    ///
    /// Day writes go out as one atomic batch; the default schedule and the
    /// month summaries are written after the batch commits.
    pub fn update_break_schedule_range(
        store: &mut impl AttendanceStore,
        user_id: &str,
        start: NaiveDate,
        raw_periods: &[BreakPeriod],
        threshold: i64,
    ) -> AppResult<ScheduleUpdate> {
        require_user(store, user_id)?;

        let periods = BreakSchedule::normalize(raw_periods);
        let nominal = periods.nominal_minutes();
        let end = end_of_month(start);

        let existing = store.load_days_in_range(user_id, start, end)?;
        let existing_dates: HashSet<NaiveDate> = existing.iter().map(|d| d.work_date).collect();

        let mut batch: Vec<AttendanceDay> = Vec::new();
        let mut changes: Vec<DayChange> = Vec::new();
        let mut months: BTreeSet<String> = BTreeSet::new();

        for before in &existing {
            let mut day = before.clone();
            day.break_periods = periods.clone();
            day.break_minutes = Some(nominal);
            Core::recompute_day(&mut day, threshold);
            day.touch();

            months.insert(day.year_month());
            changes.push(DayChange {
                user_id: user_id.to_string(),
                work_date: day.work_date,
                before: Some(before.clone()),
                after: Some(day.clone()),
            });
            batch.push(day);
        }

        let updated = batch.len();

        for date in days_in_range(start, end) {
            if existing_dates.contains(&date) {
                continue;
            }
            let day = AttendanceDay::shell(user_id, date, periods.clone());

            months.insert(day.year_month());
            changes.push(DayChange {
                user_id: user_id.to_string(),
                work_date: date,
                before: None,
                after: Some(day.clone()),
            });
            batch.push(day);
        }

        let created = batch.len() - updated;

        store.save_days_atomic(&batch)?;

        store.save_default_schedule(
            user_id,
            &DefaultBreakSchedule {
                periods: periods.clone(),
                effective_from: Some(start),
            },
        )?;

        let mut summaries = Vec::with_capacity(months.len());
        for ym in &months {
            summaries.push(rebuild_monthly_summary(store, user_id, ym)?);
        }

        store.audit(
            "schedule",
            &format!("{}/{}..{}", user_id, date_key(start), date_key(end)),
            &format!(
                "breaks={} updated={} created={}",
                periods.label(),
                updated,
                created
            ),
        )?;

        info!(
            user = user_id,
            from = %start,
            to = %end,
            updated,
            created,
            "break schedule applied"
        );

        Ok(ScheduleUpdate {
            periods,
            from: start,
            to: end,
            updated,
            created,
            changes,
            summaries,
        })
    }
}
