//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid month format: {0} (expected YYYY-MM)")]
    InvalidYearMonth(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid break period: {0}")]
    InvalidBreakPeriod(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("{0} is required")]
    MissingTime(&'static str),

    #[error("Clock-out time {clock_out} must not be earlier than clock-in time {clock_in}")]
    ClockOutBeforeClockIn { clock_in: String, clock_out: String },

    #[error("No clock-in registered for {0}: clock in first")]
    NotClockedIn(String),

    #[error("Report end {end} is before its start {start}")]
    InvalidReportRange { start: String, end: String },

    // ---------------------------
    // Precondition errors
    // ---------------------------
    #[error("No attendance record for user '{user_id}' on {work_date}")]
    RecordNotFound { user_id: String, work_date: String },

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Weekly report {0} is already submitted (use --submit to resubmit)")]
    ReportAlreadySubmitted(String),

    #[error("No weekly report {report_id} for user '{user_id}'")]
    ReportNotFound { user_id: String, report_id: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
