pub mod backup;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod del;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod nightly;
pub mod rebuild;
pub mod report;
pub mod schedule;
pub mod show;
pub mod status;
pub mod user;

use crate::config::Config;
use crate::core::trigger::{DayChange, dispatch_changes};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

/// Open the configured database, applying pending migrations.
pub(crate) fn open_store(cfg: &Config) -> AppResult<DbPool> {
    DbPool::open(&cfg.database)
}

/// `--date` value or today.
pub(crate) fn date_or_today(value: &Option<String>) -> AppResult<NaiveDate> {
    match value {
        Some(s) => date::require_date(s),
        None => Ok(date::today()),
    }
}

/// Run the write trigger over the changes produced by a command.
pub(crate) fn fire_trigger(pool: &mut DbPool, changes: &[DayChange], cfg: &Config) -> AppResult<()> {
    let corrected = dispatch_changes(pool, changes, cfg.standard_daily_minutes)?;
    if corrected > 0 {
        warn!(corrected, "write trigger rewrote derived fields");
    }
    Ok(())
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
