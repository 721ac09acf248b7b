use std::fs;

use daylog_core::{DaylogError, ScheduleItem, Settings, Task, TaskSet, GLOBAL_GROUP};
use jiff::civil::date;

mod common;
use common::create_test_store;

#[test]
fn test_missing_day_is_empty_schedule() {
    let (_temp_dir, store) = create_test_store();

    let schedule = store
        .load_day(date(2024, 1, 10))
        .expect("Failed to load missing day");

    assert!(schedule.is_empty());
}

#[test]
fn test_day_round_trip() {
    let (_temp_dir, store) = create_test_store();
    let day = date(2024, 1, 10);

    let mut schedule = store.load_day(day).expect("Failed to load day");
    schedule.push(
        ScheduleItem::from_line("2024.01.10/09:00 2024.01.10/10:30 standup")
            .expect("Failed to parse item"),
    );
    schedule.push(
        ScheduleItem::from_line("2024.01.10/10:30 2024.01.10/12:00 review")
            .expect("Failed to parse item"),
    );
    store.save_day(day, &schedule).expect("Failed to save day");

    let reloaded = store.load_day(day).expect("Failed to reload day");
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.get(1).expect("missing item").content(), "review");

    assert!(store.has_activity(day).expect("Failed to check activity"));
    assert!(!store
        .has_activity(date(2024, 1, 11))
        .expect("Failed to check activity"));
}

#[test]
fn test_day_file_is_named_after_the_day() {
    let (temp_dir, store) = create_test_store();
    let day = date(2024, 1, 10);

    let mut schedule = store.load_day(day).expect("Failed to load day");
    schedule.push(
        ScheduleItem::from_line("2024.01.10/09:00 2024.01.10/10:30 standup")
            .expect("Failed to parse item"),
    );
    store.save_day(day, &schedule).expect("Failed to save day");

    assert!(temp_dir.path().join("2024.01.10").exists());
    assert_eq!(store.day_path(day), temp_dir.path().join("2024.01.10"));
}

#[test]
fn test_save_day_drops_items_of_other_days() {
    let (_temp_dir, store) = create_test_store();
    let day = date(2024, 1, 10);

    let mut schedule = store.load_day(day).expect("Failed to load day");
    schedule.push(
        ScheduleItem::from_line("2024.01.10/09:00 2024.01.10/10:30 standup")
            .expect("Failed to parse item"),
    );
    schedule.push(
        ScheduleItem::from_line("2024.01.11/09:00 2024.01.11/09:30 stray")
            .expect("Failed to parse item"),
    );
    store.save_day(day, &schedule).expect("Failed to save day");

    let reloaded = store.load_day(day).expect("Failed to reload day");
    assert_eq!(reloaded.len(), 1);
    assert_eq!(
        reloaded.get(0).expect("missing item").content(),
        "standup"
    );
}

#[test]
fn test_corrupt_day_file_names_the_path() {
    let (temp_dir, store) = create_test_store();
    fs::write(temp_dir.path().join("2024.01.10"), "not a schedule line\n")
        .expect("Failed to write day file");

    let err = store
        .load_day(date(2024, 1, 10))
        .expect_err("Corrupt day file should not load");

    match err {
        DaylogError::Corrupt { path, .. } => {
            assert!(path.ends_with("2024.01.10"));
        }
        other => panic!("Expected Corrupt error, got {other:?}"),
    }
}

#[test]
fn test_current_marker_lifecycle() {
    let (_temp_dir, store) = create_test_store();

    assert!(store
        .load_current()
        .expect("Failed to read marker")
        .is_none());

    let running = ScheduleItem::started_at(date(2024, 1, 10).at(9, 0, 0, 0), "standup");
    store.save_current(&running).expect("Failed to save marker");

    let loaded = store
        .load_current()
        .expect("Failed to read marker")
        .expect("Marker should exist");
    assert_eq!(loaded, running);

    store.clear_current().expect("Failed to clear marker");
    assert!(store
        .load_current()
        .expect("Failed to read marker")
        .is_none());

    // Clearing again is not an error
    store.clear_current().expect("Clearing absent marker failed");
}

#[test]
fn test_marker_with_finished_activity_is_corrupt() {
    let (temp_dir, store) = create_test_store();
    fs::write(
        temp_dir.path().join("start"),
        "2024.01.10/09:00 2024.01.10/10:30 standup\n",
    )
    .expect("Failed to write marker");

    let err = store
        .load_current()
        .expect_err("Closed marker should not load");
    assert!(matches!(err, DaylogError::Corrupt { .. }));
}

#[test]
fn test_missing_settings_yield_global_only() {
    let (_temp_dir, store) = create_test_store();

    let settings = store.load_settings().expect("Failed to load settings");
    assert_eq!(settings.len(), 1);
    assert!(settings.get(GLOBAL_GROUP).is_some());
}

#[test]
fn test_settings_round_trip_preserves_order() {
    let (_temp_dir, store) = create_test_store();

    let mut settings = Settings::new();
    settings.ensure("work");
    let work = settings.get_mut("work").expect("missing group");
    work.set("pattern", "^proj").expect("Failed to set pattern");
    work.set("color", "green").expect("Failed to set color");
    settings.ensure("rest");
    let rest = settings.get_mut("rest").expect("missing group");
    rest.set("pattern", "nap").expect("Failed to set pattern");
    store
        .save_settings(&settings)
        .expect("Failed to save settings");

    let reloaded = store.load_settings().expect("Failed to reload settings");
    let names: Vec<&str> = reloaded.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec![GLOBAL_GROUP, "work", "rest"]);
    assert_eq!(
        reloaded.get("work").expect("missing group").get("pattern"),
        Some("^proj")
    );
}

#[test]
fn test_missing_config_uses_defaults() {
    let (_temp_dir, store) = create_test_store();

    let config = store.load_config().expect("Failed to load config");
    assert_eq!(config.stat_days(), 7);
}

#[test]
fn test_config_values_are_read() {
    let (temp_dir, store) = create_test_store();
    fs::write(temp_dir.path().join("config"), "# comment\nstat_day=14\n")
        .expect("Failed to write config");

    let config = store.load_config().expect("Failed to load config");
    assert_eq!(config.stat_days(), 14);
}

#[test]
fn test_tasks_round_trip() {
    let (_temp_dir, store) = create_test_store();

    let mut tasks = TaskSet::new();
    tasks.insert(Task::new("mail", "answer the inbox"));
    tasks.set_level("mail", 3);
    store.save_tasks(&tasks).expect("Failed to save tasks");

    let reloaded = store.load_tasks().expect("Failed to reload tasks");
    assert_eq!(
        reloaded.resolve("mail").expect("missing task"),
        "answer the inbox"
    );
    assert_eq!(reloaded.get("mail").expect("missing task").level(), 3);
}
