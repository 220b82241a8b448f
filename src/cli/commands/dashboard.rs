use crate::cli::commands::{date_or_today, open_store, print_json};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::dashboard::build_dashboard;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_instant, minutes_to_duration};
use chrono::Local;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard { date } = &cli.command {
        let work_date = date_or_today(date)?;
        let pool = open_store(cfg)?;
        let dash = build_dashboard(
            &pool,
            work_date,
            Local::now().naive_local(),
            cfg.standard_daily_minutes,
            &cfg.holidays,
        )?;

        if cli.json {
            return print_json(&dash);
        }

        header(format!("Attendance dashboard · {}", dash.work_date));

        let s = &dash.stats;
        println!(
            "Users: {} · working: {} · completed: {} · not started: {} · with overtime: {}\n",
            s.total, s.working, s.completed, s.not_started, s.with_overtime
        );

        let mut table = Table::new(vec![
            Column::new("NAME", 4),
            Column::new("DEPARTMENT", 10),
            Column::new("STATUS", 9),
            Column::new("IN", 5),
            Column::new("OUT", 5),
            Column::new("BREAK", 5),
            Column::new("WORKED", 6),
            Column::new("OVERTIME", 8),
        ]);
        for r in &dash.rows {
            table.add_row(vec![
                r.name.clone(),
                r.department.clone(),
                r.status.label().to_string(),
                format_instant(r.clock_in),
                format_instant(r.clock_out),
                minutes_to_duration(Some(r.break_minutes)),
                minutes_to_duration(Some(r.total_minutes)),
                minutes_to_duration(Some(r.overtime_minutes)),
            ]);
        }

        let rendered = table.render();
        let mut lines = rendered.lines();
        if let Some(head) = lines.next() {
            println!("{}", head);
        }
        for (line, r) in lines.zip(&dash.rows) {
            println!("{}{}{}", color_for_status(r.status), line, RESET);
        }

        println!("\nMonth {}:\n", dash.year_month);
        let mut monthly = Table::new(vec![
            Column::new("DEPARTMENT", 10),
            Column::new("NAME", 4),
            Column::new("WORKED", 6),
            Column::new("OVERTIME", 8),
        ]);
        for m in &dash.monthly {
            monthly.add_row(vec![
                m.department.clone(),
                m.name.clone(),
                minutes_to_duration(Some(m.total_minutes)),
                minutes_to_duration(Some(m.overtime_minutes)),
            ]);
        }
        print!("{}", monthly.render());
    }

    Ok(())
}
