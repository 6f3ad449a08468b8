#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Per-test scratch directory used as `$HOME`, so no real config is read.
pub fn test_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("timetrack_home_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path
}

pub fn tt(home: &PathBuf) -> Command {
    let mut cmd = cargo_bin_cmd!("timetrack");
    cmd.env("HOME", home).env_remove("TIMETRACK_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timetrack.sqlite", name));
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

/// Initialize a DB and save two days through the CLI.
pub fn init_db_with_data(home: &PathBuf, db_path: &str) {
    tt(home)
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    tt(home)
        .args([
            "--db", db_path, "add", "2025-09-01", "--in", "09:00", "--out", "17:00", "--pause", "30",
        ])
        .assert()
        .success();

    tt(home)
        .args([
            "--db", db_path, "add", "2025-09-03", "--in", "08:30", "--out", "12:30", "--pause", "0",
            "--note", "half day",
        ])
        .assert()
        .success();
}
