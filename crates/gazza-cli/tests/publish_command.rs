use assert_cmd::Command;
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

#[test]
fn test_publish_without_config_points_at_init() {
    let home = TempDir::new().unwrap();

    gazza(&home)
        .arg("publish")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("gazza init"));
}

#[test]
fn test_publish_requires_a_record_argument() {
    gazza(&TempDir::new().unwrap())
        .arg("publish")
        .assert()
        .failure()
        .stderr(predicate::str::contains("RECORD"));
}

#[test]
fn test_publish_help_mentions_airtable() {
    gazza(&TempDir::new().unwrap())
        .arg("publish")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Airtable"));
}
