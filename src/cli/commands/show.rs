use crate::cli::commands::{date_or_today, open_store, print_json};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::calculator::breaks::resolve_display_break_minutes;
use crate::core::calculator::daily::calculate_realtime_totals;
use crate::db::store::AttendanceStore;
use crate::errors::AppResult;
use crate::models::attendance_day::AttendanceDay;
use crate::models::day_status::DayStatus;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, RESET, color_for_overtime, color_for_status, colorize_optional};
use crate::utils::time::{format_instant, minutes_to_duration};

/// Detailed block for one day record.
pub(crate) fn print_day(day: &AttendanceDay, cfg: &Config) {
    let status_color = color_for_status(day.status);

    println!("\n{}=== {} · {} ==={}", CYAN, day.user_id, day.date_str(), RESET);
    println!(
        "Status     : {}{}{}",
        status_color,
        day.status.label(),
        RESET
    );
    println!(
        "Clock      : {} → {}",
        colorize_optional(&format_instant(day.clock_in)),
        colorize_optional(&format_instant(day.clock_out))
    );
    println!(
        "Breaks     : {} ({})",
        colorize_optional(&day.break_periods.label()),
        minutes_to_duration(resolve_display_break_minutes(
            day.work_date,
            Some(day),
            &cfg.holidays
        ))
    );

    let overtime = day.overtime_minutes.unwrap_or(0);
    println!(
        "Worked     : {}",
        colorize_optional(&minutes_to_duration(day.total_minutes))
    );
    println!(
        "Overtime   : {}{}{}",
        color_for_overtime(overtime),
        minutes_to_duration(day.overtime_minutes),
        RESET
    );

    if day.status == DayStatus::Working {
        let rt = calculate_realtime_totals(
            day.clock_in,
            day.break_minutes,
            &day.break_periods,
            cfg.standard_daily_minutes,
        );
        println!(
            "So far     : {} (overtime {})",
            minutes_to_duration(Some(rt.work_minutes)),
            minutes_to_duration(Some(rt.overtime_minutes))
        );
    }

    if !day.work_description.is_empty() {
        println!("Description: {}", day.work_description);
    }
    println!();
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { user, date } = &cli.command {
        let work_date = date_or_today(date)?;
        let pool = open_store(cfg)?;
        let day = pool.load_day(user, work_date)?;

        if cli.json {
            return print_json(&day);
        }

        match day {
            Some(d) => print_day(&d, cfg),
            None => info(format!("No attendance record for '{}' on {}.", user, work_date)),
        }
    }

    Ok(())
}
