use assert_cmd::Command;
use gazza_core::activity::{ActivityEntry, ActivityLog, ActivityStatus, actions};
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn gazza_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("gazza")
}

fn gazza(home: &TempDir) -> Command {
    let mut cmd = Command::new(gazza_bin());
    cmd.env("GAZZA_HOME", home.path());
    cmd
}

fn seed_log(home: &TempDir) -> ActivityLog {
    let log = ActivityLog::new(home.path().join("activity-log.json"));
    log.append(ActivityEntry::now(
        actions::LOAD_AIRTABLE,
        ActivityStatus::Success,
        "3 bozze caricate",
    ))
    .unwrap();
    log.append(ActivityEntry::now(
        actions::COMPILE_FORM,
        ActivityStatus::Error,
        "iPhone 13 Pro: tab not found",
    ))
    .unwrap();
    log
}

#[test]
fn test_log_show_prints_recorded_actions() {
    let home = TempDir::new().unwrap();
    seed_log(&home);

    gazza(&home)
        .args(["log", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LOAD_AIRTABLE"))
        .stdout(predicate::str::contains("COMPILE_FORM"))
        .stdout(predicate::str::contains("Showing 2 of 2 entries"));
}

#[test]
fn test_log_show_limit_keeps_the_newest() {
    let home = TempDir::new().unwrap();
    seed_log(&home);

    gazza(&home)
        .args(["log", "show", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("COMPILE_FORM"))
        .stdout(predicate::str::contains("LOAD_AIRTABLE").not());
}

#[test]
fn test_log_show_empty() {
    gazza(&TempDir::new().unwrap())
        .args(["log", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity recorded yet."));
}

#[test]
fn test_log_export_writes_csv_file() {
    let home = TempDir::new().unwrap();
    seed_log(&home);
    let out = home.path().join("export.csv");

    gazza(&home)
        .args(["log", "export", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 entries"));

    let mut reader = csv::Reader::from_path(&out).unwrap();
    assert_eq!(
        reader.headers().unwrap(),
        &csv::StringRecord::from(vec!["Timestamp", "Action", "Status", "Details"])
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "LOAD_AIRTABLE");
    assert_eq!(&rows[1][2], "error");
}

#[test]
fn test_log_export_defaults_to_stdout() {
    let home = TempDir::new().unwrap();
    seed_log(&home);

    gazza(&home)
        .args(["log", "export"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Timestamp,Action,Status,Details"));
}

#[test]
fn test_log_clear_with_yes_flag() {
    let home = TempDir::new().unwrap();
    let log = seed_log(&home);

    gazza(&home)
        .args(["log", "clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Activity log cleared"));

    assert!(log.entries().unwrap().is_empty());
}

#[test]
fn test_log_clear_cancelled_at_the_prompt() {
    let home = TempDir::new().unwrap();
    let log = seed_log(&home);

    gazza(&home)
        .args(["log", "clear"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clear cancelled."));

    assert_eq!(log.entries().unwrap().len(), 2);
}
