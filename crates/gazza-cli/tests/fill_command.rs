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
fn test_fill_rejects_unknown_marketplace() {
    // The home directory stays empty, so a marketplace check that ran
    // after config loading would report a missing config instead.
    let home = TempDir::new().unwrap();

    gazza(&home)
        .arg("fill")
        .arg("1")
        .arg("--marketplace")
        .arg("ebay")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown marketplace: ebay"));
}

#[test]
fn test_fill_rejects_unsupported_marketplace() {
    let home = TempDir::new().unwrap();

    gazza(&home)
        .arg("fill")
        .arg("1")
        .arg("--marketplace")
        .arg("wallapop")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "marketplace not supported: wallapop",
        ));
}

#[test]
fn test_fill_without_config_points_at_init() {
    let home = TempDir::new().unwrap();

    gazza(&home)
        .arg("fill")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("gazza init"));
}

#[test]
fn test_fill_help_lists_browser_flags() {
    gazza(&TempDir::new().unwrap())
        .arg("fill")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--no-wait"))
        .stdout(predicate::str::contains("--publish"))
        .stdout(predicate::str::contains("--temp-profile"));
}

#[test]
fn test_fill_requires_a_record_argument() {
    gazza(&TempDir::new().unwrap())
        .arg("fill")
        .assert()
        .failure()
        .stderr(predicate::str::contains("RECORD"));
}
