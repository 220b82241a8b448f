use crate::cli::commands::{fire_trigger, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::schedule::ScheduleLogic;
use crate::errors::AppResult;
use crate::models::break_period::BreakPeriod;
use crate::ui::messages::success;
use crate::utils::date::require_date;
use crate::utils::time::minutes_to_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule { user, from, breaks } = cmd {
        let start = require_date(from)?;
        let periods = BreakPeriod::parse_list(breaks)?;

        let mut pool = open_store(cfg)?;
        let outcome = ScheduleLogic::update_break_schedule_range(
            &mut pool,
            user,
            start,
            &periods,
            cfg.standard_daily_minutes,
        )?;
        fire_trigger(&mut pool, &outcome.changes, cfg)?;

        success(format!(
            "Break schedule {} applied to '{}' from {} to {}.",
            outcome.periods.label(),
            user,
            outcome.from,
            outcome.to
        ));
        println!(
            "   {} day(s) updated, {} day(s) created.",
            outcome.updated, outcome.created
        );
        for s in &outcome.summaries {
            println!(
                "   {}: worked {} · overtime {}",
                s.year_month,
                minutes_to_duration(Some(s.total_minutes)),
                minutes_to_duration(Some(s.overtime_minutes))
            );
        }
    }

    Ok(())
}
