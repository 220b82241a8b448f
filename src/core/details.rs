use crate::core::calculator::breaks::{BreakOverrides, derive_break_details};
use crate::core::clock::require_user;
use crate::core::logic::Core;
use crate::core::summary::rebuild_monthly_summary;
use crate::core::trigger::DayChange;
use crate::db::store::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::break_period::{BreakPeriod, BreakSchedule};
use crate::models::default_schedule::DefaultBreakSchedule;
use crate::utils::date::date_key;
use chrono::NaiveDate;
use tracing::info;

/// Editable, non-clock fields of a day. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct DetailUpdate {
    pub break_periods: Option<Vec<BreakPeriod>>,
    pub break_minutes: Option<i64>,
    pub work_description: Option<String>,
}

pub struct DetailsLogic;

impl DetailsLogic {
    /// Update break data / description of an existing day.
    ///
    /// Completed days get their totals recomputed; pending or working days
    /// only store the new break fields.
    pub fn update(
        store: &mut impl AttendanceStore,
        user_id: &str,
        work_date: NaiveDate,
        update: &DetailUpdate,
        default_schedule: &DefaultBreakSchedule,
        threshold: i64,
    ) -> AppResult<DayChange> {
        require_user(store, user_id)?;

        let existing =
            store
                .load_day(user_id, work_date)?
                .ok_or_else(|| AppError::RecordNotFound {
                    user_id: user_id.to_string(),
                    work_date: date_key(work_date),
                })?;

        let defaults = if existing.break_periods.is_empty() && existing.break_minutes.is_none() {
            default_schedule.periods_for(work_date)
        } else {
            BreakSchedule::empty()
        };

        let overrides = BreakOverrides {
            break_periods: update.break_periods.clone(),
            break_minutes: update.break_minutes,
        };
        let details = derive_break_details(Some(&existing), &overrides, &defaults);

        let mut day = existing.clone();
        day.break_periods = details.break_periods;
        day.break_minutes = Some(details.break_minutes);
        if let Some(desc) = &update.work_description {
            day.work_description = desc.trim().to_string();
        }
        Core::recompute_day(&mut day, threshold);
        day.touch();

        store.save_day(&day)?;
        rebuild_monthly_summary(store, user_id, &day.year_month())?;
        store.audit(
            "edit",
            &format!("{}/{}", user_id, day.date_str()),
            &format!(
                "breaks={} break_minutes={:?} total={:?}",
                day.break_periods.label(),
                day.break_minutes,
                day.total_minutes
            ),
        )?;

        info!(user = user_id, date = %work_date, "attendance details updated");

        Ok(DayChange {
            user_id: user_id.to_string(),
            work_date,
            before: Some(existing),
            after: Some(day),
        })
    }
}
