use rattendance::core::clock::ClockLogic;
use rattendance::core::details::{DetailUpdate, DetailsLogic};
use rattendance::db::store::AttendanceStore;
use rattendance::errors::AppError;
use rattendance::models::break_period::{BreakPeriod, BreakSchedule};
use rattendance::models::day_status::DayStatus;
use rattendance::models::default_schedule::DefaultBreakSchedule;

mod common;
use common::{THRESHOLD, at, d, memory_store};

fn no_defaults() -> DefaultBreakSchedule {
    DefaultBreakSchedule::default()
}

fn lunch_from(from: &str) -> DefaultBreakSchedule {
    DefaultBreakSchedule {
        periods: BreakSchedule::normalize(&[BreakPeriod::new("12:00", "13:00")]),
        effective_from: Some(d(from)),
    }
}

#[test]
fn clock_in_only_leaves_the_day_working() {
    let mut store = memory_store();
    let date = d("2024-06-03");

    let change = ClockLogic::clock_in(&mut store, "u1", date, "09:00", &no_defaults(), THRESHOLD)
        .expect("clock in");
    assert!(change.before.is_none());

    let day = store.load_day("u1", date).unwrap().expect("stored day");
    assert_eq!(day.status, DayStatus::Working);
    assert_eq!(day.clock_in, Some(at("2024-06-03", "09:00")));
    assert_eq!(day.total_minutes, None);
    assert_eq!(day.overtime_minutes, None);

    let summary = store.load_summary("u1", "2024-06").unwrap().expect("summary");
    assert_eq!(summary.total_minutes, 0);
}

#[test]
fn flat_break_flow_completes_at_standard_day() {
    let mut store = memory_store();
    let date = d("2024-06-03");

    ClockLogic::clock_in(&mut store, "u1", date, "09:00", &no_defaults(), THRESHOLD).unwrap();
    DetailsLogic::update(
        &mut store,
        "u1",
        date,
        &DetailUpdate {
            break_minutes: Some(60),
            ..DetailUpdate::default()
        },
        &no_defaults(),
        THRESHOLD,
    )
    .unwrap();
    ClockLogic::clock_out(&mut store, "u1", date, "18:00", &no_defaults(), THRESHOLD).unwrap();

    let day = store.load_day("u1", date).unwrap().unwrap();
    assert_eq!(day.status, DayStatus::Completed);
    assert_eq!(day.break_minutes, Some(60));
    assert_eq!(day.total_minutes, Some(480));
    assert_eq!(day.overtime_minutes, Some(0));

    let summary = store.load_summary("u1", "2024-06").unwrap().unwrap();
    assert_eq!(summary.total_minutes, 480);
    assert_eq!(summary.overtime_minutes, 0);
}

#[test]
fn default_schedule_is_applied_from_its_effective_date() {
    let mut store = memory_store();
    let defaults = lunch_from("2024-06-10");

    ClockLogic::clock_in(&mut store, "u1", d("2024-06-12"), "09:00", &defaults, THRESHOLD).unwrap();
    ClockLogic::clock_out(&mut store, "u1", d("2024-06-12"), "19:30", &defaults, THRESHOLD).unwrap();

    let day = store.load_day("u1", d("2024-06-12")).unwrap().unwrap();
    assert_eq!(day.break_periods.label(), "12:00-13:00");
    assert_eq!(day.break_minutes, Some(60));
    assert_eq!(day.total_minutes, Some(570));
    assert_eq!(day.overtime_minutes, Some(90));

    // before the effective date the default does not apply
    ClockLogic::clock_in(&mut store, "u1", d("2024-06-05"), "09:00", &defaults, THRESHOLD).unwrap();
    let early = store.load_day("u1", d("2024-06-05")).unwrap().unwrap();
    assert!(early.break_periods.is_empty());
    assert_eq!(early.break_minutes, Some(0));
}

#[test]
fn working_day_stores_nominal_break_of_its_periods() {
    let mut store = memory_store();
    let defaults = lunch_from("2024-06-01");

    ClockLogic::clock_in(&mut store, "u1", d("2024-06-03"), "13:30", &defaults, THRESHOLD).unwrap();

    let day = store.load_day("u1", d("2024-06-03")).unwrap().unwrap();
    assert_eq!(day.break_minutes, Some(60));

    // once completed only the overlap with the span is kept
    ClockLogic::clock_out(&mut store, "u1", d("2024-06-03"), "18:00", &defaults, THRESHOLD).unwrap();
    let day = store.load_day("u1", d("2024-06-03")).unwrap().unwrap();
    assert_eq!(day.break_minutes, Some(0));
    assert_eq!(day.total_minutes, Some(270));
}

#[test]
fn clock_out_before_clock_in_is_rejected_without_changes() {
    let mut store = memory_store();
    let date = d("2024-06-03");

    ClockLogic::clock_in(&mut store, "u1", date, "09:00", &no_defaults(), THRESHOLD).unwrap();
    let before = store.load_day("u1", date).unwrap();

    let err = ClockLogic::clock_out(&mut store, "u1", date, "08:00", &no_defaults(), THRESHOLD)
        .unwrap_err();
    assert!(matches!(err, AppError::ClockOutBeforeClockIn { .. }));

    assert_eq!(store.load_day("u1", date).unwrap(), before);
}

#[test]
fn clock_out_equal_to_clock_in_gives_zero_minutes() {
    let mut store = memory_store();
    let date = d("2024-06-03");

    ClockLogic::clock_in(&mut store, "u1", date, "09:00", &no_defaults(), THRESHOLD).unwrap();
    ClockLogic::clock_out(&mut store, "u1", date, "09:00", &no_defaults(), THRESHOLD).unwrap();

    let day = store.load_day("u1", date).unwrap().unwrap();
    assert_eq!(day.status, DayStatus::Completed);
    assert_eq!(day.total_minutes, Some(0));
}

#[test]
fn clock_out_requires_a_clock_in() {
    let mut store = memory_store();

    let err = ClockLogic::clock_out(&mut store, "u1", d("2024-06-03"), "18:00", &no_defaults(), THRESHOLD)
        .unwrap_err();
    assert!(matches!(err, AppError::NotClockedIn(_)));
    assert!(store.load_day("u1", d("2024-06-03")).unwrap().is_none());
}

#[test]
fn malformed_or_missing_times_are_rejected() {
    let mut store = memory_store();
    let date = d("2024-06-03");

    let err = ClockLogic::clock_in(&mut store, "u1", date, "9:00", &no_defaults(), THRESHOLD)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));

    let err = ClockLogic::clock_in(&mut store, "u1", date, "25:00", &no_defaults(), THRESHOLD)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(_)));

    let err = ClockLogic::clock_in(&mut store, "u1", date, "  ", &no_defaults(), THRESHOLD)
        .unwrap_err();
    assert!(matches!(err, AppError::MissingTime(_)));

    assert!(store.load_day("u1", date).unwrap().is_none());
}

#[test]
fn unknown_users_are_rejected() {
    let mut store = memory_store();

    let err = ClockLogic::clock_in(&mut store, "ghost", d("2024-06-03"), "09:00", &no_defaults(), THRESHOLD)
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownUser(_)));
}

#[test]
fn re_clock_in_on_completed_day_recomputes_against_clock_out() {
    let mut store = memory_store();
    let date = d("2024-06-03");

    ClockLogic::clock_in(&mut store, "u1", date, "09:00", &no_defaults(), THRESHOLD).unwrap();
    ClockLogic::clock_out(&mut store, "u1", date, "17:00", &no_defaults(), THRESHOLD).unwrap();

    ClockLogic::clock_in(&mut store, "u1", date, "08:00", &no_defaults(), THRESHOLD).unwrap();
    let day = store.load_day("u1", date).unwrap().unwrap();
    assert_eq!(day.status, DayStatus::Completed);
    assert_eq!(day.total_minutes, Some(540));
    assert_eq!(day.overtime_minutes, Some(60));

    let err = ClockLogic::clock_in(&mut store, "u1", date, "18:00", &no_defaults(), THRESHOLD)
        .unwrap_err();
    assert!(matches!(err, AppError::ClockOutBeforeClockIn { .. }));
    assert_eq!(store.load_day("u1", date).unwrap().unwrap().total_minutes, Some(540));
}

#[test]
fn clear_operations_walk_the_state_machine_back() {
    let mut store = memory_store();
    let date = d("2024-06-03");
    let defaults = lunch_from("2024-06-01");

    ClockLogic::clock_in(&mut store, "u1", date, "09:00", &defaults, THRESHOLD).unwrap();
    ClockLogic::clock_out(&mut store, "u1", date, "18:00", &defaults, THRESHOLD).unwrap();
    assert_eq!(store.load_summary("u1", "2024-06").unwrap().unwrap().total_minutes, 480);

    ClockLogic::clear_clock_out(&mut store, "u1", date, THRESHOLD)
        .unwrap()
        .expect("record exists");
    let day = store.load_day("u1", date).unwrap().unwrap();
    assert_eq!(day.status, DayStatus::Working);
    assert!(day.clock_in.is_some());
    assert_eq!(day.total_minutes, None);
    assert_eq!(store.load_summary("u1", "2024-06").unwrap().unwrap().total_minutes, 0);

    ClockLogic::clear_clock_in(&mut store, "u1", date, THRESHOLD)
        .unwrap()
        .expect("record exists");
    let day = store.load_day("u1", date).unwrap().unwrap();
    assert_eq!(day.status, DayStatus::Pending);
    assert!(day.clock_in.is_none() && day.clock_out.is_none());
    // break data survives
    assert_eq!(day.break_periods.label(), "12:00-13:00");
    assert_eq!(day.break_minutes, Some(60));

    // clear-out without a clock-in behaves like clear-in
    let again = ClockLogic::clear_clock_out(&mut store, "u1", date, THRESHOLD).unwrap();
    assert!(again.is_some());
    assert_eq!(store.load_day("u1", date).unwrap().unwrap().status, DayStatus::Pending);

    // no record: no-op
    assert!(
        ClockLogic::clear_clock_in(&mut store, "u1", d("2024-06-04"), THRESHOLD)
            .unwrap()
            .is_none()
    );
}

#[test]
fn editing_periods_of_a_completed_day_recomputes_totals() {
    let mut store = memory_store();
    let date = d("2024-06-03");

    ClockLogic::clock_in(&mut store, "u1", date, "09:00", &no_defaults(), THRESHOLD).unwrap();
    ClockLogic::clock_out(&mut store, "u1", date, "19:30", &no_defaults(), THRESHOLD).unwrap();
    assert_eq!(store.load_day("u1", date).unwrap().unwrap().total_minutes, Some(630));

    DetailsLogic::update(
        &mut store,
        "u1",
        date,
        &DetailUpdate {
            break_periods: Some(vec![BreakPeriod::new("12:00", "13:00")]),
            work_description: Some("  release prep ".into()),
            ..DetailUpdate::default()
        },
        &no_defaults(),
        THRESHOLD,
    )
    .unwrap();

    let day = store.load_day("u1", date).unwrap().unwrap();
    assert_eq!(day.total_minutes, Some(570));
    assert_eq!(day.overtime_minutes, Some(90));
    assert_eq!(day.work_description, "release prep");

    // clearing the periods with a flat value
    DetailsLogic::update(
        &mut store,
        "u1",
        date,
        &DetailUpdate {
            break_periods: Some(vec![]),
            break_minutes: Some(30),
            ..DetailUpdate::default()
        },
        &no_defaults(),
        THRESHOLD,
    )
    .unwrap();

    let day = store.load_day("u1", date).unwrap().unwrap();
    assert!(day.break_periods.is_empty());
    assert_eq!(day.break_minutes, Some(30));
    assert_eq!(day.total_minutes, Some(600));
    assert_eq!(store.load_summary("u1", "2024-06").unwrap().unwrap().total_minutes, 600);
}

#[test]
fn flat_break_edit_replaces_scheduled_periods() {
    let mut store = memory_store();
    let date = d("2024-06-03");
    let defaults = lunch_from("2024-06-01");

    ClockLogic::clock_in(&mut store, "u1", date, "09:00", &defaults, THRESHOLD).unwrap();
    assert_eq!(store.load_day("u1", date).unwrap().unwrap().break_minutes, Some(60));

    DetailsLogic::update(
        &mut store,
        "u1",
        date,
        &DetailUpdate {
            break_minutes: Some(30),
            ..DetailUpdate::default()
        },
        &defaults,
        THRESHOLD,
    )
    .unwrap();

    let day = store.load_day("u1", date).unwrap().unwrap();
    assert!(day.break_periods.is_empty());
    assert_eq!(day.break_minutes, Some(30));

    // the default schedule does not come back at clock-out
    ClockLogic::clock_out(&mut store, "u1", date, "18:00", &defaults, THRESHOLD).unwrap();
    let day = store.load_day("u1", date).unwrap().unwrap();
    assert!(day.break_periods.is_empty());
    assert_eq!(day.break_minutes, Some(30));
    assert_eq!(day.total_minutes, Some(510));
    assert_eq!(day.overtime_minutes, Some(30));
}

#[test]
fn editing_a_missing_day_fails() {
    let mut store = memory_store();

    let err = DetailsLogic::update(
        &mut store,
        "u1",
        d("2024-06-03"),
        &DetailUpdate::default(),
        &no_defaults(),
        THRESHOLD,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::RecordNotFound { .. }));
}

#[test]
fn deleting_a_day_rebuilds_its_month() {
    let mut store = memory_store();
    let date = d("2024-06-03");

    ClockLogic::clock_in(&mut store, "u1", date, "09:00", &no_defaults(), THRESHOLD).unwrap();
    ClockLogic::clock_out(&mut store, "u1", date, "17:00", &no_defaults(), THRESHOLD).unwrap();
    assert_eq!(store.load_summary("u1", "2024-06").unwrap().unwrap().total_minutes, 480);

    let change = ClockLogic::delete_day(&mut store, "u1", date).unwrap().expect("deleted");
    assert!(change.after.is_none());
    assert!(store.load_day("u1", date).unwrap().is_none());
    assert_eq!(store.load_summary("u1", "2024-06").unwrap().unwrap().total_minutes, 0);

    assert!(ClockLogic::delete_day(&mut store, "u1", date).unwrap().is_none());
}
