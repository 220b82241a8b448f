use crate::cli::commands::{date_or_today, open_store, print_json};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::calculator::daily::{RealtimeTotals, calculate_realtime_totals};
use crate::db::store::AttendanceStore;
use crate::errors::AppResult;
use crate::models::day_status::DayStatus;
use crate::utils::colors::{RESET, color_for_overtime, color_for_status};
use crate::utils::time::{format_instant, minutes_to_duration};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView {
    status: DayStatus,
    #[serde(flatten)]
    totals: RealtimeTotals,
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { user, date } = &cli.command {
        let work_date = date_or_today(date)?;
        let pool = open_store(cfg)?;
        let day = pool.load_day(user, work_date)?;

        let status = day.as_ref().map(|d| d.status).unwrap_or_default();
        let totals = match &day {
            Some(d) if status == DayStatus::Working => calculate_realtime_totals(
                d.clock_in,
                d.break_minutes,
                &d.break_periods,
                cfg.standard_daily_minutes,
            ),
            Some(d) => RealtimeTotals {
                work_minutes: d.total_minutes.unwrap_or(0),
                overtime_minutes: d.overtime_minutes.unwrap_or(0),
            },
            None => RealtimeTotals::default(),
        };

        if cli.json {
            return print_json(&StatusView { status, totals });
        }

        println!(
            "{} · {}: {}{}{} (in {})",
            user,
            work_date,
            color_for_status(status),
            status.label(),
            RESET,
            format_instant(day.as_ref().and_then(|d| d.clock_in))
        );
        println!(
            "Worked {} · overtime {}{}{}",
            minutes_to_duration(Some(totals.work_minutes)),
            color_for_overtime(totals.overtime_minutes),
            minutes_to_duration(Some(totals.overtime_minutes)),
            RESET
        );
    }

    Ok(())
}
