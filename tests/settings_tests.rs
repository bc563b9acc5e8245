use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, run_ok, rwl, settings_path, setup_test_db};

#[test]
fn test_pet_inputs_persist_between_runs() {
    let db_path = setup_test_db("persist_pet");
    init_db(&db_path);

    run_ok(
        &db_path,
        &[
            "add",
            "pet_mood",
            "--set",
            "pet_mood=8",
            "--set",
            "pet_energy_slider=6",
        ],
    );

    let yaml = fs::read_to_string(settings_path(&db_path)).unwrap();
    assert!(yaml.contains("pet_mood_slider: 8"), "{}", yaml);
    assert!(yaml.contains("pet_energy_slider: 6"), "{}", yaml);

    // second commit without values reuses the restored ones
    run_ok(&db_path, &["add", "pet_mood"]);

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let mut stmt = conn
        .prepare("SELECT mood, energy FROM pet_mood ORDER BY id")
        .unwrap();
    let rows: Vec<(i64, i64)> = stmt
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(rows, vec![(8, 6), (8, 6)]);
}

#[test]
fn test_form_shows_restored_values() {
    let db_path = setup_test_db("persist_form");
    init_db(&db_path);

    run_ok(
        &db_path,
        &["add", "pet_notes", "--set", "pet_notes=Scratching the door"],
    );

    run_ok(&db_path, &["form", "pet_notes"])
        .stdout(contains("Scratching the door"))
        .stdout(contains("pet_date"));
}

#[test]
fn test_unreadable_settings_fail_loudly() {
    let db_path = setup_test_db("settings_garbage");
    init_db(&db_path);
    fs::write(settings_path(&db_path), "values: [oops").unwrap();

    rwl()
        .args(["--db", &db_path, "--test", "view", "sleep"])
        .assert()
        .failure()
        .stderr(contains("Settings error"));
}

#[test]
fn test_form_catalog() {
    let db_path = setup_test_db("form_catalog");
    init_db(&db_path);

    run_ok(&db_path, &["form", "--list"])
        .stdout(contains("pet_walk_notes"))
        .stdout(contains("mental"));
}

#[test]
fn test_total_hours_wraps_midnight() {
    rwl()
        .args(["total-hours", "--asleep", "22:15", "--awake", "01:00"])
        .assert()
        .success()
        .stdout(contains("02:45"));

    rwl()
        .args(["total-hours", "--asleep", "06:00", "--awake", "06:00"])
        .assert()
        .success()
        .stdout(contains("00:00"));

    rwl()
        .args(["total-hours", "--asleep", "25:00", "--awake", "06:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));
}
