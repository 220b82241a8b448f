//! Console feedback for attendance commands.
//! Tables and JSON go to stdout through the command handlers; these
//! helpers only print one-line status messages.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";

fn line<T: fmt::Display>(color: &str, icon: &str, msg: T) {
    println!("{color}{BOLD}{icon}{RESET} {msg}");
}

pub fn info<T: fmt::Display>(msg: T) {
    line(FG_BLUE, ICON_INFO, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    line(FG_GREEN, ICON_OK, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    line(FG_YELLOW, ICON_WARN, msg);
}

/// Section title, e.g. the dashboard heading.
pub fn header<T: fmt::Display>(msg: T) {
    let title = msg.to_string();
    println!("\n{FG_BLUE}{BOLD}{title}{RESET}");
    println!("{FG_BLUE}{}{RESET}\n", "═".repeat(title.chars().count()));
}
