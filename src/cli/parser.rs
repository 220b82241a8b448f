use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
/// CLI application to track employee attendance with SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee attendance CLI: clock in/out, break schedules, daily and monthly totals using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print read commands as JSON instead of tables
    #[arg(global = true, long = "json")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user (or update an existing one)
    Add {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        department: Option<String>,

        /// employee or admin (default from configuration)
        #[arg(long)]
        role: Option<String>,
    },

    /// List registered users
    List {
        #[arg(long, help = "Only users with this role (employee, admin)")]
        role: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Save a weekly report as draft, or submit it
    Save {
        #[arg(long)]
        user: String,

        /// First day of the week (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Last day of the week (YYYY-MM-DD, default start + 6 days)
        #[arg(long)]
        end: Option<String>,

        /// Report body
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,

        /// Read the report body from a file
        #[arg(long)]
        file: Option<String>,

        /// Submit instead of saving a draft
        #[arg(long)]
        submit: bool,
    },

    /// Print one weekly report
    Show {
        #[arg(long)]
        user: String,

        #[arg(long)]
        start: String,

        #[arg(long)]
        end: Option<String>,
    },

    /// List weekly reports, newest week first
    List {
        #[arg(long, help = "Only reports of this user")]
        user: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or check the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, default_value_t = 50, help = "Number of most recent rows")]
        limit: usize,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Zip the backup
        #[arg(long)]
        compress: bool,

        /// Overwrite an existing destination without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Weekly reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Register the clock-in of a day
    ClockIn {
        #[arg(long)]
        user: String,

        /// Work date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Clock-in time (HH:MM, default now)
        time: Option<String>,
    },

    /// Register the clock-out of a day
    ClockOut {
        #[arg(long)]
        user: String,

        /// Work date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Clock-out time (HH:MM, default now)
        time: Option<String>,
    },

    /// Remove clock-in and clock-out of a day (break data is kept)
    ClearIn {
        #[arg(long)]
        user: String,

        #[arg(long)]
        date: Option<String>,
    },

    /// Remove the clock-out of a day
    ClearOut {
        #[arg(long)]
        user: String,

        #[arg(long)]
        date: Option<String>,
    },

    /// Edit break data or description of an existing day
    Edit {
        #[arg(long)]
        user: String,

        #[arg(long)]
        date: Option<String>,

        /// Break periods, e.g. "12:00-13:00,15:00-15:15"
        #[arg(long = "breaks", conflicts_with = "clear_breaks")]
        breaks: Option<String>,

        /// Flat break minutes (used when the day has no periods)
        #[arg(long = "break-minutes")]
        break_minutes: Option<String>,

        /// Remove every break period of the day
        #[arg(long = "clear-breaks")]
        clear_breaks: bool,

        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Apply a break schedule from a date through the end of its month
    Schedule {
        #[arg(long)]
        user: String,

        /// First day the schedule applies to (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Break periods, e.g. "12:00-13:00,15:00-15:15" (empty clears)
        #[arg(long)]
        breaks: String,
    },

    /// Delete the attendance record of a day
    Del {
        #[arg(long)]
        user: String,

        /// Date (YYYY-MM-DD)
        date: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show one day
    Show {
        #[arg(long)]
        user: String,

        #[arg(long)]
        date: Option<String>,
    },

    /// List the days of a month with its summary
    List {
        #[arg(long)]
        user: String,

        /// Month (YYYY-MM, default current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Realtime worked / overtime estimate of a day in progress
    Status {
        #[arg(long)]
        user: String,

        #[arg(long)]
        date: Option<String>,
    },

    /// Administrator view of every user for a date
    Dashboard {
        #[arg(long)]
        date: Option<String>,
    },

    /// Rebuild monthly summaries from the day records
    Rebuild {
        /// Month (YYYY-MM, default current month)
        #[arg(long)]
        month: Option<String>,

        /// Only this user (default: every user)
        #[arg(long)]
        user: Option<String>,
    },

    /// Scheduled job: rebuild the current month for every employee
    Nightly {
        /// Execution date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}
