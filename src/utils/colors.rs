/// ANSI color helper utilities for terminal output.
use crate::models::day_status::DayStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_status(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Pending => GREY,
        DayStatus::Working => YELLOW,
        DayStatus::Completed => GREEN,
    }
}

/// Overtime color: >0 → red, otherwise reset.
pub fn color_for_overtime(value: i64) -> &'static str {
    if value > 0 { RED } else { RESET }
}

/// Grey out empty placeholders ("--:--", "-").
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
