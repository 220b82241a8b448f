use rusqlite::{Connection, OptionalExtension, Result, params};
use tracing::info;

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
            [version],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Users, day records, month summaries and default break schedules.
fn create_core_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            department  TEXT NOT NULL DEFAULT '',
            role        TEXT NOT NULL DEFAULT 'employee' CHECK(role IN ('employee','admin')),
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS attendance (
            user_id           TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            work_date         TEXT NOT NULL,
            clock_in          TEXT,
            clock_out         TEXT,
            break_minutes     INTEGER,
            break_periods     TEXT NOT NULL DEFAULT '[]',
            work_description  TEXT NOT NULL DEFAULT '',
            total_minutes     INTEGER,
            overtime_minutes  INTEGER,
            status            TEXT NOT NULL DEFAULT 'pending'
                              CHECK(status IN ('pending','working','completed')),
            created_at        TEXT NOT NULL,
            updated_at        TEXT NOT NULL,
            PRIMARY KEY (user_id, work_date),
            CHECK (clock_out IS NULL OR clock_in IS NOT NULL)
        );

        CREATE TABLE IF NOT EXISTS monthly_summary (
            user_id           TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            year_month        TEXT NOT NULL,
            total_minutes     INTEGER NOT NULL DEFAULT 0,
            overtime_minutes  INTEGER NOT NULL DEFAULT 0,
            updated_at        TEXT NOT NULL,
            PRIMARY KEY (user_id, year_month)
        );

        CREATE TABLE IF NOT EXISTS break_schedules (
            user_id         TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            periods         TEXT NOT NULL DEFAULT '[]',
            effective_from  TEXT,
            updated_at      TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Lookups by date across users (dashboard) and by month (summaries).
fn create_lookup_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_work_date ON attendance(work_date);
        CREATE INDEX IF NOT EXISTS idx_summary_year_month ON monthly_summary(year_month);
        CREATE INDEX IF NOT EXISTS idx_users_role ON users(role);
        "#,
    )?;
    Ok(())
}

/// Weekly free-text reports, one per user and week range.
fn create_weekly_reports(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS weekly_reports (
            user_id       TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            report_id     TEXT NOT NULL,
            start_date    TEXT NOT NULL,
            end_date      TEXT NOT NULL,
            week          INTEGER NOT NULL,
            content       TEXT NOT NULL DEFAULT '',
            status        TEXT NOT NULL DEFAULT 'draft' CHECK(status IN ('draft','submitted')),
            submitted_at  TEXT,
            updated_at    TEXT NOT NULL,
            PRIMARY KEY (user_id, report_id),
            CHECK (end_date >= start_date)
        );

        CREATE INDEX IF NOT EXISTS idx_reports_start ON weekly_reports(start_date);
        "#,
    )?;
    Ok(())
}

type MigrationFn = fn(&Connection) -> Result<()>;

const MIGRATIONS: &[(&str, &str, MigrationFn)] = &[
    (
        "20250301_0001_core_tables",
        "Created users, attendance, monthly_summary and break_schedules tables",
        create_core_tables,
    ),
    (
        "20250412_0002_lookup_indexes",
        "Added work_date / year_month / role indexes",
        create_lookup_indexes,
    ),
    (
        "20250520_0003_weekly_reports",
        "Created weekly_reports table",
        create_weekly_reports,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db(). Each migration runs inside its own
/// transaction together with its `migration_applied` log row.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, apply) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch("BEGIN;")?;
        let outcome = apply(conn).and_then(|_| {
            conn.execute(
                "INSERT INTO log (date, operation, target, message)
                 VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
                params![version, message],
            )
            .map(|_| ())
        });

        match outcome {
            Ok(()) => {
                conn.execute_batch("COMMIT;")?;
                info!(version = *version, "migration applied");
            }
            Err(e) => {
                conn.execute_batch("ROLLBACK;")?;
                return Err(e);
            }
        }
    }

    Ok(())
}
