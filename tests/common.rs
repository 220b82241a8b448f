#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rattendance::core::users::UserLogic;
use rattendance::db::pool::DbPool;
use rattendance::models::user::Role;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const THRESHOLD: i64 = 480;

pub fn rti() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB through the CLI and register one employee `u1`
pub fn init_db_with_user(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rti()
        .args([
            "--db",
            db_path,
            "user",
            "add",
            "--id",
            "u1",
            "--name",
            "Alice",
            "--department",
            "R&D",
        ])
        .assert()
        .success();
}

/// In-memory store with employees `u1` (Alice, R&D), `u2` (Bob, Ops)
/// and admin `a1` (Carol, Ops).
pub fn memory_store() -> DbPool {
    let mut pool = DbPool::open_in_memory().expect("open in-memory db");
    UserLogic::add(&mut pool, "u1", "Alice", Some("R&D"), Role::Employee).expect("add u1");
    UserLogic::add(&mut pool, "u2", "Bob", Some("Ops"), Role::Employee).expect("add u2");
    UserLogic::add(&mut pool, "a1", "Carol", Some("Ops"), Role::Admin).expect("add a1");
    pool
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M")
        .expect("valid instant")
}
