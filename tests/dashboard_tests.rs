use chrono::NaiveDate;
use rattendance::core::clock::ClockLogic;
use rattendance::core::dashboard::build_dashboard;
use rattendance::core::schedule::ScheduleLogic;
use rattendance::core::users::UserLogic;
use rattendance::db::pool::DbPool;
use rattendance::models::break_period::BreakPeriod;
use rattendance::models::day_status::DayStatus;
use rattendance::models::default_schedule::DefaultBreakSchedule;
use rattendance::models::user::Role;

mod common;
use common::{THRESHOLD, at, d, memory_store};

#[test]
fn dashboard_rows_stats_and_monthly_totals() {
    let mut store = memory_store();
    let none = DefaultBreakSchedule::default();
    let date = d("2024-06-03");

    // Alice: completed with overtime
    ClockLogic::clock_in(&mut store, "u1", date, "08:00", &none, THRESHOLD).unwrap();
    ClockLogic::clock_out(&mut store, "u1", date, "18:00", &none, THRESHOLD).unwrap();
    // Bob: still working
    ClockLogic::clock_in(&mut store, "u2", date, "09:00", &none, THRESHOLD).unwrap();
    // Carol: nothing yet

    let dash = build_dashboard(&store, date, at("2024-06-03", "12:00"), THRESHOLD, &[]).unwrap();

    assert_eq!(dash.year_month, "2024-06");
    let names: Vec<&str> = dash.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

    let alice = &dash.rows[0];
    assert_eq!(alice.status, DayStatus::Completed);
    assert_eq!(alice.total_minutes, 600);
    assert_eq!(alice.overtime_minutes, 120);
    assert!(alice.realtime.is_none());

    let bob = &dash.rows[1];
    assert_eq!(bob.status, DayStatus::Working);
    assert_eq!(bob.total_minutes, 180);
    assert_eq!(bob.realtime.map(|r| r.work_minutes), Some(180));

    let carol = &dash.rows[2];
    assert_eq!(carol.status, DayStatus::Pending);
    assert!(carol.clock_in.is_none());
    assert_eq!(carol.total_minutes, 0);

    assert_eq!(dash.stats.total, 3);
    assert_eq!(dash.stats.completed, 1);
    assert_eq!(dash.stats.working, 1);
    assert_eq!(dash.stats.not_started, 1);
    assert_eq!(dash.stats.with_overtime, 1);

    // department first, then name
    let monthly: Vec<(&str, &str, i64)> = dash
        .monthly
        .iter()
        .map(|m| (m.department.as_str(), m.name.as_str(), m.total_minutes))
        .collect();
    assert_eq!(
        monthly,
        vec![("Ops", "Bob", 0), ("Ops", "Carol", 0), ("R&D", "Alice", 600)]
    );
}

#[test]
fn dashboard_without_users_is_empty() {
    let store = DbPool::open_in_memory().unwrap();

    let dash = build_dashboard(&store, d("2024-06-03"), at("2024-06-03", "12:00"), THRESHOLD, &[]).unwrap();
    assert!(dash.rows.is_empty());
    assert!(dash.monthly.is_empty());
    assert_eq!(dash.stats.total, 0);
}

#[test]
fn late_worker_shows_realtime_overtime() {
    let mut store = memory_store();
    UserLogic::add(&mut store, "u3", "Dave", None, Role::Employee).unwrap();
    ClockLogic::clock_in(
        &mut store,
        "u3",
        d("2024-06-03"),
        "07:00",
        &DefaultBreakSchedule::default(),
        THRESHOLD,
    )
    .unwrap();

    let dash = build_dashboard(&store, d("2024-06-03"), at("2024-06-03", "16:30"), THRESHOLD, &[]).unwrap();
    let dave = dash.rows.iter().find(|r| r.user_id == "u3").unwrap();
    assert_eq!(dave.total_minutes, 570);
    assert_eq!(dave.overtime_minutes, 90);
    assert_eq!(dash.stats.with_overtime, 1);
}

#[test]
fn scheduled_placeholders_show_no_break_on_days_off() {
    let mut store = memory_store();
    ScheduleLogic::update_break_schedule_range(
        &mut store,
        "u1",
        d("2024-06-03"),
        &[BreakPeriod::new("12:00", "12:45")],
        THRESHOLD,
    )
    .unwrap();

    let break_of_alice = |date: &str, holidays: &[NaiveDate]| {
        let dash = build_dashboard(&store, d(date), at(date, "08:00"), THRESHOLD, holidays).unwrap();
        dash.rows.iter().find(|r| r.user_id == "u1").map(|r| r.break_minutes)
    };

    assert_eq!(break_of_alice("2024-06-07", &[]), Some(45));
    assert_eq!(break_of_alice("2024-06-08", &[]), Some(0));
    assert_eq!(break_of_alice("2024-06-07", &[d("2024-06-07")]), Some(0));
}
