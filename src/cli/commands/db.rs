use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

/// `(table, rowid, parent)` rows pointing at a missing user.
fn orphan_rows(pool: &DbPool) -> AppResult<Vec<(String, i64, String)>> {
    let mut stmt = pool.conn.prepare("PRAGMA foreign_key_check;")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<i64>>(1)?.unwrap_or_default(),
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Applying attendance schema migrations…{}", CYAN, RESET);
            run_pending_migrations(&pool.conn)?;
            println!("{}✔ Schema is up to date.{}\n", GREEN, RESET);
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        //
        // 3) CHECK: SQLite integrity plus records of unknown users
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
            let orphans = orphan_rows(&pool)?;

            if integrity == "ok" && orphans.is_empty() {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                if integrity != "ok" {
                    println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
                }
                for (table, rowid, parent) in &orphans {
                    println!(
                        "{}✘ {} row {} references a missing {} record{}",
                        RED, table, rowid, parent, RESET
                    );
                }
                println!();
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Compacting attendance database…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            ttlog(&pool.conn, "vacuum", &cfg.database, "Database compacted")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
