use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use std::path::Path;

mod common;
use common::{init_db_with_user, rti, setup_test_db, temp_out};

fn json_of(db_path: &str, args: &[&str]) -> Value {
    let out = rti()
        .args(["--db", db_path, "--json"])
        .args(args)
        .output()
        .expect("run rattendance");
    assert!(out.status.success(), "command failed: {:?}", args);
    serde_json::from_slice(&out.stdout).expect("valid json on stdout")
}

#[test]
fn test_clock_in_out_and_show() {
    let db_path = setup_test_db("cli_clock_in_out");
    init_db_with_user(&db_path);

    rti()
        .args(["--db", &db_path, "clock-in", "--user", "u1", "--date", "2024-06-03", "09:00"])
        .assert()
        .success()
        .stdout(contains("Clock-in at 09:00"))
        .stdout(contains("working"));

    rti()
        .args([
            "--db",
            &db_path,
            "edit",
            "--user",
            "u1",
            "--date",
            "2024-06-03",
            "--breaks",
            "12:00-13:00",
        ])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "clock-out", "--user", "u1", "--date", "2024-06-03", "19:30"])
        .assert()
        .success()
        .stdout(contains("completed"))
        .stdout(contains("9h30m"));

    let day = json_of(&db_path, &["show", "--user", "u1", "--date", "2024-06-03"]);
    assert_eq!(day["status"], "completed");
    assert_eq!(day["totalMinutes"], 570);
    assert_eq!(day["overtimeMinutes"], 90);
    assert_eq!(day["breakMinutes"], 60);
}

#[test]
fn test_clock_out_before_clock_in_fails() {
    let db_path = setup_test_db("cli_clock_out_before_in");
    init_db_with_user(&db_path);

    rti()
        .args(["--db", &db_path, "clock-in", "--user", "u1", "--date", "2024-06-03", "09:00"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "clock-out", "--user", "u1", "--date", "2024-06-03", "08:00"])
        .assert()
        .failure()
        .stderr(contains("must not be earlier"));

    let day = json_of(&db_path, &["show", "--user", "u1", "--date", "2024-06-03"]);
    assert_eq!(day["status"], "working");
    assert!(day["clockOut"].is_null());
}

#[test]
fn test_unknown_user_and_bad_time() {
    let db_path = setup_test_db("cli_unknown_user");
    init_db_with_user(&db_path);

    rti()
        .args(["--db", &db_path, "clock-in", "--user", "nobody", "09:00"])
        .assert()
        .failure()
        .stderr(contains("Unknown user"));

    rti()
        .args(["--db", &db_path, "clock-in", "--user", "u1", "--date", "2024-06-03", "9.00"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));
}

#[test]
fn test_schedule_and_month_list() {
    let db_path = setup_test_db("cli_schedule_list");
    init_db_with_user(&db_path);

    for (date, out) in [("2024-06-03", "18:00"), ("2024-06-12", "18:00")] {
        rti()
            .args(["--db", &db_path, "clock-in", "--user", "u1", "--date", date, "09:00"])
            .assert()
            .success();
        rti()
            .args(["--db", &db_path, "clock-out", "--user", "u1", "--date", date, out])
            .assert()
            .success();
    }

    rti()
        .args([
            "--db",
            &db_path,
            "schedule",
            "--user",
            "u1",
            "--from",
            "2024-06-10",
            "--breaks",
            "12:00-12:45",
        ])
        .assert()
        .success()
        .stdout(contains("1 day(s) updated, 20 day(s) created"));

    let month = json_of(&db_path, &["list", "--user", "u1", "--month", "2024-06"]);
    assert_eq!(month["summary"]["totalMinutes"], 540 + 495);
    assert_eq!(month["summary"]["overtimeMinutes"], 60 + 15);
    assert_eq!(month["days"].as_array().map(Vec::len), Some(1 + 21));

    rti()
        .args(["--db", &db_path, "list", "--user", "u1", "--month", "2024-06"])
        .assert()
        .success()
        .stdout(contains("2024-06-03"))
        .stdout(contains("12:00-12:45"))
        .stdout(contains("Month total: 17h15m"));

    // placeholders on a weekend show no break, weekdays keep the schedule
    rti()
        .args(["--db", &db_path, "show", "--user", "u1", "--date", "2024-06-15"])
        .assert()
        .success()
        .stdout(contains("12:00-12:45 (0h00m)"));
    rti()
        .args(["--db", &db_path, "show", "--user", "u1", "--date", "2024-06-14"])
        .assert()
        .success()
        .stdout(contains("12:00-12:45 (0h45m)"));
}

#[test]
fn test_delete_day_with_confirmation_flag() {
    let db_path = setup_test_db("cli_delete_day");
    init_db_with_user(&db_path);

    rti()
        .args(["--db", &db_path, "clock-in", "--user", "u1", "--date", "2024-06-03", "09:00"])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "del", "--user", "u1", "2024-06-03", "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    rti()
        .args(["--db", &db_path, "show", "--user", "u1", "--date", "2024-06-03"])
        .assert()
        .success()
        .stdout(contains("No attendance record"));

    // declined prompt keeps nothing to delete anyway
    rti()
        .args(["--db", &db_path, "del", "--user", "u1", "2024-06-04"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));
}

#[test]
fn test_dashboard_and_nightly() {
    let db_path = setup_test_db("cli_dashboard");
    init_db_with_user(&db_path);

    rti()
        .args([
            "--db", &db_path, "user", "add", "--id", "boss", "--name", "Zed", "--role", "admin",
        ])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "clock-in", "--user", "u1", "--date", "2024-06-03", "08:00"])
        .assert()
        .success();
    rti()
        .args(["--db", &db_path, "clock-out", "--user", "u1", "--date", "2024-06-03", "17:00"])
        .assert()
        .success();

    let dash = json_of(&db_path, &["dashboard", "--date", "2024-06-03"]);
    assert_eq!(dash["stats"]["total"], 2);
    assert_eq!(dash["stats"]["completed"], 1);
    assert_eq!(dash["stats"]["notStarted"], 1);
    assert_eq!(dash["stats"]["withOvertime"], 1);
    assert_eq!(dash["rows"][0]["name"], "Alice");
    assert_eq!(dash["rows"][0]["overtimeMinutes"], 60);

    let nightly = json_of(&db_path, &["nightly", "--date", "2024-06-20"]);
    let ids: Vec<&str> = nightly
        .as_array()
        .expect("array of summaries")
        .iter()
        .filter_map(|s| s["userId"].as_str())
        .collect();
    assert_eq!(ids, vec!["u1"]);

    rti()
        .args(["--db", &db_path, "rebuild", "--month", "2024-06"])
        .assert()
        .success()
        .stdout(contains("Rebuilt 2 summary(ies) for 2024-06"));
}

#[test]
fn test_users_and_log() {
    let db_path = setup_test_db("cli_users_log");
    init_db_with_user(&db_path);

    let users = json_of(&db_path, &["user", "list"]);
    assert_eq!(users[0]["id"], "u1");
    assert_eq!(users[0]["role"], "employee");

    rti()
        .args(["--db", &db_path, "user", "add", "--id", "x", "--name", "X", "--role", "boss"])
        .assert()
        .failure()
        .stderr(contains("Invalid role"));

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("user_add").and(contains("migration_applied")));
}

#[test]
fn test_weekly_report_flow() {
    let db_path = setup_test_db("cli_weekly_report");
    init_db_with_user(&db_path);

    rti()
        .args([
            "--db", &db_path, "report", "save", "--user", "u1", "--start", "2024-06-03", "--content",
            "first draft",
        ])
        .assert()
        .success()
        .stdout(contains("saved as draft"));

    rti()
        .args([
            "--db", &db_path, "report", "save", "--user", "u1", "--start", "2024-06-03", "--submit",
        ])
        .assert()
        .success()
        .stdout(contains("submitted"));

    let reports = json_of(&db_path, &["report", "list"]);
    assert_eq!(reports[0]["id"], "2024-06-03_2024-06-09");
    assert_eq!(reports[0]["status"], "submitted");
    assert_eq!(reports[0]["content"], "first draft");
    assert!(reports[0]["submittedAt"].is_string());

    rti()
        .args([
            "--db", &db_path, "report", "save", "--user", "u1", "--start", "2024-06-03", "--content", "x",
        ])
        .assert()
        .failure()
        .stderr(contains("already submitted"));

    rti()
        .args(["--db", &db_path, "report", "show", "--user", "u1", "--start", "2024-06-03"])
        .assert()
        .success()
        .stdout(contains("week 23"))
        .stdout(contains("first draft"));
}

#[test]
fn test_db_info_and_backup() {
    let db_path = setup_test_db("cli_db_backup");
    init_db_with_user(&db_path);

    rti()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Users:"))
        .stdout(contains("Weekly reports:"))
        .stdout(contains("Integrity check passed"));

    let out = temp_out("cli_db_backup", "sqlite");
    rti()
        .args(["--db", &db_path, "backup", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&out).exists());

    let zipped = temp_out("cli_db_backup_zip", "zip");
    let plain = zipped.trim_end_matches(".zip").to_string() + ".sqlite";
    rti()
        .args(["--db", &db_path, "backup", "--file", &plain, "--compress", "--force"])
        .assert()
        .success();
    assert!(Path::new(&zipped).exists());
    assert!(!Path::new(&plain).exists());
}
