use chrono::NaiveDate;
use rattendance::config::Config;

#[test]
fn missing_fields_fall_back_to_defaults() {
    let cfg = Config::from_yaml("standard_daily_minutes: 450\n").expect("partial config loads");

    assert_eq!(cfg.database, Config::database_file().to_string_lossy());
    assert_eq!(cfg.standard_daily_minutes, 450);
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.default_role, "employee");
    assert!(cfg.holidays.is_empty());

    let missing = Config::missing_fields("standard_daily_minutes: 450\n").unwrap();
    assert!(missing.contains(&"database"));
}

#[test]
fn holidays_are_read_as_dates() {
    let cfg = Config::from_yaml("database: /tmp/att.sqlite\nholidays:\n  - 2024-06-10\n  - 2024-12-25\n")
        .expect("config with holidays");

    assert_eq!(cfg.database, "/tmp/att.sqlite");
    assert_eq!(
        cfg.holidays,
        vec![
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
        ]
    );
}

#[test]
fn out_of_range_threshold_is_rejected() {
    assert!(Config::from_yaml("standard_daily_minutes: 0\n").is_err());
}
