use crate::cli::commands::show::print_day;
use crate::cli::commands::{date_or_today, fire_trigger, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::details::{DetailUpdate, DetailsLogic};
use crate::db::store::AttendanceStore;
use crate::errors::AppResult;
use crate::models::break_period::BreakPeriod;
use crate::ui::messages::success;
use crate::utils::time::parse_optional_non_negative_int;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        user,
        date,
        breaks,
        break_minutes,
        clear_breaks,
        description,
    } = cmd
    {
        let work_date = date_or_today(date)?;

        let break_periods = if *clear_breaks {
            Some(Vec::new())
        } else {
            breaks.as_deref().map(BreakPeriod::parse_list).transpose()?
        };

        let update = DetailUpdate {
            break_periods,
            break_minutes: break_minutes
                .as_deref()
                .map(|v| parse_optional_non_negative_int(Some(v))),
            work_description: description.clone(),
        };

        let mut pool = open_store(cfg)?;
        let defaults = pool.load_default_schedule(user)?;
        let change = DetailsLogic::update(
            &mut pool,
            user,
            work_date,
            &update,
            &defaults,
            cfg.standard_daily_minutes,
        )?;
        fire_trigger(&mut pool, std::slice::from_ref(&change), cfg)?;

        success(format!("Attendance of '{}' on {} updated.", user, work_date));
        if let Some(day) = pool.load_day(user, work_date)? {
            print_day(&day, cfg);
        }
    }

    Ok(())
}
