use crate::cli::commands::{open_store, print_json};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::clock::require_user;
use crate::core::summary::rebuild_for_users;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::{parse_year_month, today, year_month_of};
use crate::utils::time::minutes_to_duration;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Rebuild { month, user } = &cli.command {
        let ym = match month {
            Some(m) => year_month_of(parse_year_month(m)?),
            None => year_month_of(today()),
        };

        let mut pool = open_store(cfg)?;
        if let Some(id) = user {
            require_user(&pool, id)?;
        }
        let summaries = rebuild_for_users(&mut pool, user.as_deref(), None, &ym)?;

        if cli.json {
            return print_json(&summaries);
        }

        success(format!("Rebuilt {} summary(ies) for {}.", summaries.len(), ym));
        for s in &summaries {
            println!(
                "   {}: worked {} · overtime {}",
                s.user_id,
                minutes_to_duration(Some(s.total_minutes)),
                minutes_to_duration(Some(s.overtime_minutes))
            );
        }
    }

    Ok(())
}
