#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rwl() -> Command {
    cargo_bin_cmd!("rwellog")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing DB and settings file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rwellog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(settings_path(&db_path)).ok();
    db_path
}

/// Settings file used in test mode
pub fn settings_path(db_path: &str) -> String {
    format!("{}.settings.yml", db_path)
}

/// `--db <path> --test <args...>`
pub fn run_ok(db_path: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    rwl()
        .args(["--db", db_path, "--test"])
        .args(args)
        .assert()
        .success()
}

/// Initialize an empty DB
pub fn init_db(db_path: &str) {
    run_ok(db_path, &["init"]);
}

/// Number of rows stored in `table`, read directly through the library
pub fn count(db_path: &str, table: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .expect("count rows")
}

/// Ids of `table`, newest first
pub fn ids(db_path: &str, table: &str) -> Vec<i64> {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let mut stmt = conn
        .prepare(&format!("SELECT id FROM {} ORDER BY id DESC", table))
        .expect("prepare");
    stmt.query_map([], |r| r.get(0))
        .expect("query")
        .map(|r| r.expect("row"))
        .collect()
}
