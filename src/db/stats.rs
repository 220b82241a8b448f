use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

/// Row counts and covered date range of an attendance database.
#[derive(Debug, Clone, Default)]
pub struct DbStats {
    pub users: i64,
    pub employees: i64,
    pub days: i64,
    pub completed_days: i64,
    pub summaries: i64,
    pub reports: i64,
    pub submitted_reports: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

pub fn collect_stats(pool: &DbPool) -> rusqlite::Result<DbStats> {
    let count = |sql: &str| -> rusqlite::Result<i64> { pool.conn.query_row(sql, [], |row| row.get(0)) };

    Ok(DbStats {
        users: count("SELECT COUNT(*) FROM users")?,
        employees: count("SELECT COUNT(*) FROM users WHERE role = 'employee'")?,
        days: count("SELECT COUNT(*) FROM attendance")?,
        completed_days: count("SELECT COUNT(*) FROM attendance WHERE status = 'completed'")?,
        summaries: count("SELECT COUNT(*) FROM monthly_summary")?,
        reports: count("SELECT COUNT(*) FROM weekly_reports")?,
        submitted_reports: count("SELECT COUNT(*) FROM weekly_reports WHERE status = 'submitted'")?,
        first_date: pool
            .conn
            .query_row("SELECT MIN(work_date) FROM attendance", [], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()?
            .flatten(),
        last_date: pool
            .conn
            .query_row("SELECT MAX(work_date) FROM attendance", [], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()?
            .flatten(),
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) COUNTS
    //
    let stats = collect_stats(pool)?;
    println!(
        "{}• Users:{} {}{}{} ({} employees)",
        CYAN, RESET, GREEN, stats.users, RESET, stats.employees
    );
    println!(
        "{}• Attendance days:{} {}{}{} ({} completed)",
        CYAN, RESET, GREEN, stats.days, RESET, stats.completed_days
    );
    println!("{}• Monthly summaries:{} {}", CYAN, RESET, stats.summaries);
    println!(
        "{}• Weekly reports:{} {} ({} submitted)",
        CYAN, RESET, stats.reports, stats.submitted_reports
    );

    //
    // 3) DATE RANGE
    //
    let missing = format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", stats.first_date.as_deref().unwrap_or(&missing));
    println!("    to:   {}", stats.last_date.as_deref().unwrap_or(&missing));

    println!();
    Ok(())
}
