use crate::cli::commands::show::print_day;
use crate::cli::commands::{date_or_today, fire_trigger, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::ClockLogic;
use crate::core::trigger::DayChange;
use crate::db::pool::DbPool;
use crate::db::store::AttendanceStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use chrono::Local;

fn now_token() -> String {
    Local::now().format("%H:%M").to_string()
}

fn report(pool: &mut DbPool, change: &DayChange, cfg: &Config, msg: String) -> AppResult<()> {
    fire_trigger(pool, std::slice::from_ref(change), cfg)?;
    success(msg);
    if let Some(day) = pool.load_day(&change.user_id, change.work_date)? {
        print_day(&day, cfg);
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut pool = open_store(cfg)?;
    let threshold = cfg.standard_daily_minutes;

    match cmd {
        Commands::ClockIn { user, date, time } => {
            let work_date = date_or_today(date)?;
            let time = time.clone().unwrap_or_else(now_token);
            let defaults = pool.load_default_schedule(user)?;

            let change =
                ClockLogic::clock_in(&mut pool, user, work_date, &time, &defaults, threshold)?;
            report(
                &mut pool,
                &change,
                cfg,
                format!("Clock-in at {} registered for '{}' on {}.", time, user, work_date),
            )?;
        }
        Commands::ClockOut { user, date, time } => {
            let work_date = date_or_today(date)?;
            let time = time.clone().unwrap_or_else(now_token);
            let defaults = pool.load_default_schedule(user)?;

            let change =
                ClockLogic::clock_out(&mut pool, user, work_date, &time, &defaults, threshold)?;
            report(
                &mut pool,
                &change,
                cfg,
                format!("Clock-out at {} registered for '{}' on {}.", time, user, work_date),
            )?;
        }
        Commands::ClearIn { user, date } => {
            let work_date = date_or_today(date)?;
            match ClockLogic::clear_clock_in(&mut pool, user, work_date, threshold)? {
                Some(change) => report(
                    &mut pool,
                    &change,
                    cfg,
                    format!("Clock times cleared for '{}' on {}.", user, work_date),
                )?,
                None => info(format!("No attendance record for '{}' on {}.", user, work_date)),
            }
        }
        Commands::ClearOut { user, date } => {
            let work_date = date_or_today(date)?;
            match ClockLogic::clear_clock_out(&mut pool, user, work_date, threshold)? {
                Some(change) => report(
                    &mut pool,
                    &change,
                    cfg,
                    format!("Clock-out cleared for '{}' on {}.", user, work_date),
                )?,
                None => info(format!("No attendance record for '{}' on {}.", user, work_date)),
            }
        }
        _ => {}
    }

    Ok(())
}
