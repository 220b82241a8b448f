use crate::core::calculator::breaks::{BreakOverrides, derive_break_details};
use crate::core::logic::Core;
use crate::core::summary::rebuild_monthly_summary;
use crate::core::trigger::DayChange;
use crate::db::store::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::attendance_day::AttendanceDay;
use crate::models::break_period::BreakSchedule;
use crate::models::default_schedule::DefaultBreakSchedule;
use crate::models::user::User;
use crate::utils::date::date_key;
use crate::utils::time::{format_instant, instant_on};
use chrono::NaiveDate;
use tracing::{debug, info};

/// Clock-in / clock-out state transitions of a single day.
pub struct ClockLogic;

pub(crate) fn require_user(store: &impl AttendanceStore, user_id: &str) -> AppResult<User> {
    store
        .load_user(user_id)?
        .ok_or_else(|| AppError::UnknownUser(user_id.to_string()))
}

/// Default periods only matter when the day carries no break data at all.
fn fallback_periods(
    existing: Option<&AttendanceDay>,
    default_schedule: &DefaultBreakSchedule,
    work_date: NaiveDate,
) -> BreakSchedule {
    match existing {
        Some(day) if !day.break_periods.is_empty() || day.break_minutes.is_some() => {
            BreakSchedule::empty()
        }
        _ => default_schedule.periods_for(work_date),
    }
}

/// Persist `day`, rebuild its month and write the audit line.
fn commit_day(
    store: &mut impl AttendanceStore,
    mut day: AttendanceDay,
    before: Option<AttendanceDay>,
    operation: &str,
) -> AppResult<DayChange> {
    day.touch();
    store.save_day(&day)?;
    rebuild_monthly_summary(store, &day.user_id, &day.year_month())?;

    store.audit(
        operation,
        &format!("{}/{}", day.user_id, day.date_str()),
        &format!(
            "in={} out={} total={:?} overtime={:?}",
            format_instant(day.clock_in),
            format_instant(day.clock_out),
            day.total_minutes,
            day.overtime_minutes
        ),
    )?;

    Ok(DayChange {
        user_id: day.user_id.clone(),
        work_date: day.work_date,
        before,
        after: Some(day),
    })
}

impl ClockLogic {
    /// Register (or move) the clock-in of `work_date`.
    ///
    /// A day that is already completed is recomputed against its existing
    /// clock-out; a clock-in later than that clock-out is rejected.
    pub fn clock_in(
        store: &mut impl AttendanceStore,
        user_id: &str,
        work_date: NaiveDate,
        time: &str,
        default_schedule: &DefaultBreakSchedule,
        threshold: i64,
    ) -> AppResult<DayChange> {
        require_user(store, user_id)?;
        let clock_in = instant_on(work_date, time, "Clock-in time")?;

        let existing = store.load_day(user_id, work_date)?;

        if let Some(clock_out) = existing.as_ref().and_then(|d| d.clock_out)
            && clock_out < clock_in
        {
            return Err(AppError::ClockOutBeforeClockIn {
                clock_in: format_instant(Some(clock_in)),
                clock_out: format_instant(Some(clock_out)),
            });
        }

        let defaults = fallback_periods(existing.as_ref(), default_schedule, work_date);
        let details = derive_break_details(existing.as_ref(), &BreakOverrides::default(), &defaults);

        let mut day = existing
            .clone()
            .unwrap_or_else(|| AttendanceDay::new(user_id, work_date));
        day.clock_in = Some(clock_in);
        day.break_periods = details.break_periods;
        day.break_minutes = Some(details.break_minutes);
        Core::recompute_day(&mut day, threshold);

        info!(user = user_id, date = %work_date, time, "clock-in registered");
        commit_day(store, day, existing, "clock_in")
    }

    /// Register the clock-out of `work_date`; requires a clock-in.
    pub fn clock_out(
        store: &mut impl AttendanceStore,
        user_id: &str,
        work_date: NaiveDate,
        time: &str,
        default_schedule: &DefaultBreakSchedule,
        threshold: i64,
    ) -> AppResult<DayChange> {
        require_user(store, user_id)?;

        let existing = store
            .load_day(user_id, work_date)?
            .ok_or_else(|| AppError::NotClockedIn(date_key(work_date)))?;
        let clock_in = existing
            .clock_in
            .ok_or_else(|| AppError::NotClockedIn(date_key(work_date)))?;

        let clock_out = instant_on(work_date, time, "Clock-out time")?;
        if clock_out < clock_in {
            return Err(AppError::ClockOutBeforeClockIn {
                clock_in: format_instant(Some(clock_in)),
                clock_out: format_instant(Some(clock_out)),
            });
        }

        let defaults = fallback_periods(Some(&existing), default_schedule, work_date);
        let details = derive_break_details(Some(&existing), &BreakOverrides::default(), &defaults);

        let mut day = existing.clone();
        day.clock_out = Some(clock_out);
        day.break_periods = details.break_periods;
        day.break_minutes = Some(details.break_minutes);
        Core::recompute_day(&mut day, threshold);

        debug!(
            user = user_id,
            date = %work_date,
            break_minutes = ?day.break_minutes,
            total = ?day.total_minutes,
            overtime = ?day.overtime_minutes,
            "clock-out computed"
        );
        commit_day(store, day, Some(existing), "clock_out")
    }

    /// Back to `pending`: drops both clock times and the totals, keeps break data.
    /// No-op when the day has no record.
    pub fn clear_clock_in(
        store: &mut impl AttendanceStore,
        user_id: &str,
        work_date: NaiveDate,
        threshold: i64,
    ) -> AppResult<Option<DayChange>> {
        let Some(existing) = store.load_day(user_id, work_date)? else {
            return Ok(None);
        };

        let mut day = existing.clone();
        day.clock_in = None;
        day.clock_out = None;
        Core::recompute_day(&mut day, threshold);

        commit_day(store, day, Some(existing), "clear_clock_in").map(Some)
    }

    /// Back to `working`: drops the clock-out and the totals, keeps the clock-in.
    /// Behaves like [`ClockLogic::clear_clock_in`] when there is no clock-in.
    pub fn clear_clock_out(
        store: &mut impl AttendanceStore,
        user_id: &str,
        work_date: NaiveDate,
        threshold: i64,
    ) -> AppResult<Option<DayChange>> {
        let Some(existing) = store.load_day(user_id, work_date)? else {
            return Ok(None);
        };

        if existing.clock_in.is_none() {
            return Self::clear_clock_in(store, user_id, work_date, threshold);
        }

        let mut day = existing.clone();
        day.clock_out = None;
        Core::recompute_day(&mut day, threshold);

        commit_day(store, day, Some(existing), "clear_clock_out").map(Some)
    }

    /// Administrative hard delete of a day record.
    pub fn delete_day(
        store: &mut impl AttendanceStore,
        user_id: &str,
        work_date: NaiveDate,
    ) -> AppResult<Option<DayChange>> {
        let Some(existing) = store.load_day(user_id, work_date)? else {
            return Ok(None);
        };

        store.delete_day(user_id, work_date)?;
        rebuild_monthly_summary(store, user_id, &existing.year_month())?;
        store.audit(
            "delete_day",
            &format!("{}/{}", user_id, date_key(work_date)),
            "Attendance record deleted",
        )?;

        Ok(Some(DayChange {
            user_id: user_id.to_string(),
            work_date,
            before: Some(existing),
            after: None,
        }))
    }
}
