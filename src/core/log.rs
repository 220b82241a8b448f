use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};
use crate::utils::formatting::pad_right;

const MAX_TARGET_WIDTH: usize = 40;

fn color_for_operation(op: &str) -> &'static str {
    match op {
        "clock_in" | "clock_out" | "user_add" => GREEN,
        "delete_day" | "clear_clock_in" | "clear_clock_out" => RED,
        "edit" | "schedule" => YELLOW,
        "rebuild" | "nightly" | "backup" => CYAN,
        _ => GREY,
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    /// Print the most recent `limit` audit rows, oldest first.
    pub fn print_log(pool: &DbPool, limit: usize) -> AppResult<()> {
        let mut entries: Vec<LogRow> = load_log(&pool.conn, limit)?;
        entries.reverse();

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries.iter().map(|e| e.operation.len()).max().unwrap_or(10);
        let target_w = entries
            .iter()
            .map(|e| e.target.chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_TARGET_WIDTH);

        println!("📜 Internal log:\n");

        for e in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or_else(|_| e.date.clone());

            println!(
                "{:>5}  {}  {}{}{}  {}  {}",
                e.id,
                date,
                color_for_operation(&e.operation),
                pad_right(&e.operation, op_w),
                RESET,
                pad_right(&truncate(&e.target, MAX_TARGET_WIDTH), target_w),
                e.message
            );
        }

        Ok(())
    }
}
