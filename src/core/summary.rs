use crate::core::calculator::monthly::summarize_month;
use crate::db::store::AttendanceStore;
use crate::errors::AppResult;
use crate::models::monthly_summary::MonthlySummary;
use crate::models::user::Role;
use crate::utils::date::month_bounds;
use tracing::debug;

/// Re-scan every day of `year_month` for `user_id` and overwrite the summary.
///
/// Pure re-derivation: calling it any number of times, in any order with
/// other rebuilds, leaves the same summary.
pub fn rebuild_monthly_summary(
    store: &mut impl AttendanceStore,
    user_id: &str,
    year_month: &str,
) -> AppResult<MonthlySummary> {
    let (first, last) = month_bounds(year_month)?;
    let days = store.load_days_in_range(user_id, first, last)?;

    let summary = summarize_month(user_id, year_month, &days);
    store.save_summary(&summary)?;

    debug!(
        user = user_id,
        month = year_month,
        total = summary.total_minutes,
        overtime = summary.overtime_minutes,
        "monthly summary rebuilt"
    );

    Ok(summary)
}

/// Rebuild `year_month` for one user or, with `None`, for every user of `role`.
pub fn rebuild_for_users(
    store: &mut impl AttendanceStore,
    user_id: Option<&str>,
    role: Option<Role>,
    year_month: &str,
) -> AppResult<Vec<MonthlySummary>> {
    let ids: Vec<String> = match user_id {
        Some(id) => vec![id.to_string()],
        None => store.list_users(role)?.into_iter().map(|u| u.id).collect(),
    };

    let mut out = Vec::with_capacity(ids.len());
    for id in &ids {
        out.push(rebuild_monthly_summary(store, id, year_month)?);
    }

    store.audit(
        "rebuild",
        year_month,
        &format!("Rebuilt {} monthly summaries", out.len()),
    )?;
    Ok(out)
}
