use crate::cli::commands::{fire_trigger, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::ClockLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::date;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        user,
        date: date_str,
        yes,
    } = cmd
    {
        let d = date::require_date(date_str)?;

        //
        // Confirmation prompt
        //
        let prompt = format!(
            "Delete the attendance of '{}' on {}? This action is irreversible.",
            user, d
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        let mut pool = open_store(cfg)?;

        match ClockLogic::delete_day(&mut pool, user, d)? {
            Some(change) => {
                fire_trigger(&mut pool, std::slice::from_ref(&change), cfg)?;
                success(format!("Attendance of '{}' on {} has been deleted.", user, d));
            }
            None => info(format!("No attendance record for '{}' on {}.", user, d)),
        }
    }

    Ok(())
}
