use crate::cli::commands::{date_or_today, open_store, print_json};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::trigger::nightly_rebuild;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::year_month_of;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Nightly { date } = &cli.command {
        let executed_on = date_or_today(date)?;
        let mut pool = open_store(cfg)?;
        let summaries = nightly_rebuild(&mut pool, executed_on)?;

        if cli.json {
            return print_json(&summaries);
        }

        success(format!(
            "Nightly rebuild of {}: {} employee summary(ies) refreshed.",
            year_month_of(executed_on),
            summaries.len()
        ));
    }

    Ok(())
}
