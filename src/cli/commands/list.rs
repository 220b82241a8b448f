use crate::cli::commands::{open_store, print_json};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::calculator::breaks::resolve_display_break_minutes;
use crate::db::store::AttendanceStore;
use crate::errors::AppResult;
use crate::models::attendance_day::AttendanceDay;
use crate::models::monthly_summary::MonthlySummary;
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_overtime, color_for_status};
use crate::utils::date::{month_bounds, today, year_month_of};
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_instant, minutes_to_duration};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthView<'a> {
    user_id: &'a str,
    year_month: &'a str,
    days: &'a [AttendanceDay],
    summary: Option<&'a MonthlySummary>,
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::List { user, month } = &cli.command {
        let ym = month.clone().unwrap_or_else(|| year_month_of(today()));
        let (first, last) = month_bounds(&ym)?;

        let pool = open_store(cfg)?;
        let days = pool.load_days_in_range(user, first, last)?;
        let summary = pool.load_summary(user, &ym)?;

        if cli.json {
            return print_json(&MonthView {
                user_id: user,
                year_month: &ym,
                days: &days,
                summary: summary.as_ref(),
            });
        }

        if days.is_empty() {
            info(format!("No attendance records for '{}' in {}.", user, ym));
            return Ok(());
        }

        println!("\n{}\n", bold(&format!("{} · {}", user, ym)));

        let mut table = Table::new(vec![
            Column::new("DATE", 10),
            Column::new("STATUS", 9),
            Column::new("IN", 5),
            Column::new("OUT", 5),
            Column::new("BREAKS", 6),
            Column::new("BREAK", 5),
            Column::new("WORKED", 6),
            Column::new("OVERTIME", 8),
        ]);

        for d in &days {
            table.add_row(vec![
                d.date_str(),
                d.status.label().to_string(),
                format_instant(d.clock_in),
                format_instant(d.clock_out),
                d.break_periods.label(),
                minutes_to_duration(resolve_display_break_minutes(
                    d.work_date,
                    Some(d),
                    &cfg.holidays,
                )),
                minutes_to_duration(d.total_minutes),
                minutes_to_duration(d.overtime_minutes),
            ]);
        }

        // rows are colored after padding so widths stay right
        let rendered = table.render();
        let mut lines = rendered.lines();
        if let Some(header) = lines.next() {
            println!("{}", header);
        }
        for (line, d) in lines.zip(&days) {
            println!("{}{}{}", color_for_status(d.status), line, RESET);
        }

        let (total, overtime) = summary
            .as_ref()
            .map(|s| (s.total_minutes, s.overtime_minutes))
            .unwrap_or((0, 0));
        println!(
            "\nMonth total: {} · overtime {}{}{}\n",
            minutes_to_duration(Some(total)),
            color_for_overtime(overtime),
            minutes_to_duration(Some(overtime)),
            RESET
        );
    }

    Ok(())
}
