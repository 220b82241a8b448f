use crate::cli::commands::{open_store, print_json};
use crate::cli::parser::{Commands, ReportAction};
use crate::config::Config;
use crate::core::reports::ReportLogic;
use crate::errors::AppResult;
use crate::models::weekly_report::{ReportStatus, WeeklyReport};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREEN, RESET, YELLOW};
use crate::utils::date::require_date;
use crate::utils::table::{Column, Table};
use std::fs;

fn status_color(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Draft => YELLOW,
        ReportStatus::Submitted => GREEN,
    }
}

fn print_report(report: &WeeklyReport) {
    header(format!(
        "Weekly report · {} · week {} ({} → {})",
        report.user_id, report.week, report.start, report.end
    ));
    println!(
        "Status: {}{}{}{}\n",
        status_color(report.status),
        report.status.to_db_str(),
        RESET,
        report
            .submitted_at
            .as_deref()
            .map(|at| format!(" at {}", at))
            .unwrap_or_default()
    );
    println!("{}\n", report.content);
}

pub fn handle(cmd: &Commands, cfg: &Config, json: bool) -> AppResult<()> {
    let Commands::Report { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_store(cfg)?;

    match action {
        ReportAction::Save {
            user,
            start,
            end,
            content,
            file,
            submit,
        } => {
            let start = require_date(start)?;
            let end = end.as_deref().map(require_date).transpose()?;
            let body = match file {
                Some(path) => Some(fs::read_to_string(path)?),
                None => content.clone(),
            };

            let report = ReportLogic::save(&mut pool, user, start, end, body.as_deref(), *submit)?;
            if json {
                return print_json(&report);
            }
            if *submit {
                success(format!("Weekly report {} submitted for '{}'.", report.id, user));
            } else {
                success(format!("Weekly report {} saved as draft for '{}'.", report.id, user));
            }
        }
        ReportAction::Show { user, start, end } => {
            let start = require_date(start)?;
            let end = end.as_deref().map(require_date).transpose()?;
            let report = ReportLogic::load(&pool, user, start, end)?;
            if json {
                return print_json(&report);
            }
            print_report(&report);
        }
        ReportAction::List { user } => {
            let reports = ReportLogic::list(&pool, user.as_deref())?;
            if json {
                return print_json(&reports);
            }
            if reports.is_empty() {
                info("No weekly reports.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("USER", 4),
                Column::new("WEEK", 4),
                Column::new("START", 10),
                Column::new("END", 10),
                Column::new("STATUS", 9),
            ]);
            for r in &reports {
                table.add_row(vec![
                    r.user_id.clone(),
                    r.week.to_string(),
                    r.start.to_string(),
                    r.end.to_string(),
                    r.status.to_db_str().to_string(),
                ]);
            }

            let rendered = table.render();
            let mut lines = rendered.lines();
            if let Some(head) = lines.next() {
                println!("{}", head);
            }
            for (line, r) in lines.zip(&reports) {
                println!("{}{}{}", status_color(r.status), line, RESET);
            }
        }
    }

    Ok(())
}
