use crate::core::clock::require_user;
use crate::db::store::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::weekly_report::{REPORT_TEMPLATE, ReportStatus, WeeklyReport};
use crate::utils::date::date_key;
use chrono::{Duration, Local, NaiveDate};
use tracing::info;

pub struct ReportLogic;

impl ReportLogic {
    /// Week covered by a report: `end` defaults to `start + 6 days`.
    pub fn week_range(start: NaiveDate, end: Option<NaiveDate>) -> AppResult<(NaiveDate, NaiveDate)> {
        let end = end.unwrap_or(start + Duration::days(6));
        if end < start {
            return Err(AppError::InvalidReportRange {
                start: date_key(start),
                end: date_key(end),
            });
        }
        Ok((start, end))
    }

    /// Save a draft or submit the report of `user_id` for `[start, end]`.
    ///
    /// Without new content the stored body (or the template) is kept.
    /// A submitted report can only be submitted again, not turned back
    /// into a draft.
    pub fn save(
        store: &mut impl AttendanceStore,
        user_id: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
        content: Option<&str>,
        submit: bool,
    ) -> AppResult<WeeklyReport> {
        require_user(store, user_id)?;
        let (start, end) = Self::week_range(start, end)?;
        let id = WeeklyReport::report_id(start, end);

        let existing = store.load_report(user_id, &id)?;
        if !submit
            && let Some(prev) = &existing
            && prev.status == ReportStatus::Submitted
        {
            return Err(AppError::ReportAlreadySubmitted(id));
        }

        let content = match content {
            Some(text) => text.trim_end().to_string(),
            None => existing
                .as_ref()
                .map(|r| r.content.clone())
                .unwrap_or_else(|| REPORT_TEMPLATE.to_string()),
        };

        let now = Local::now().to_rfc3339();
        let (status, submitted_at) = if submit {
            (ReportStatus::Submitted, Some(now.clone()))
        } else {
            (ReportStatus::Draft, None)
        };

        let report = WeeklyReport {
            user_id: user_id.to_string(),
            id,
            start,
            end,
            week: WeeklyReport::week_of(start),
            content,
            status,
            submitted_at,
            updated_at: now,
        };
        store.save_report(&report)?;

        store.audit(
            if submit { "report_submit" } else { "report_draft" },
            &format!("{}/{}", user_id, report.id),
            &format!("week {} ({} chars)", report.week, report.content.chars().count()),
        )?;
        info!(user = user_id, report = %report.id, status = status.to_db_str(), "weekly report saved");

        Ok(report)
    }

    pub fn load(
        store: &impl AttendanceStore,
        user_id: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> AppResult<WeeklyReport> {
        let (start, end) = Self::week_range(start, end)?;
        let id = WeeklyReport::report_id(start, end);
        store
            .load_report(user_id, &id)?
            .ok_or_else(|| AppError::ReportNotFound {
                user_id: user_id.to_string(),
                report_id: id,
            })
    }

    pub fn list(store: &impl AttendanceStore, user_id: Option<&str>) -> AppResult<Vec<WeeklyReport>> {
        store.list_reports(user_id)
    }
}
