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
fn test_init_creates_config_and_mappings() {
    let home = TempDir::new().unwrap();

    gazza(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"))
        .stdout(predicate::str::contains("Next steps"));

    assert!(home.path().join("config.toml").exists());
    assert!(home.path().join("mappings.json").exists());

    let config = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(config.contains("[airtable]"));
    assert!(config.contains("table = \"Annunci\""));
    assert!(config.contains("[fill]"));

    let mappings = std::fs::read_to_string(home.path().join("mappings.json")).unwrap();
    assert!(mappings.contains("Smartphone"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    gazza(&home).arg("init").assert().success();

    std::fs::write(home.path().join("config.toml"), "# hand-edited\n").unwrap();

    gazza(&home)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    let config = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert_eq!(config, "# hand-edited\n");
}

#[test]
fn test_init_force_overwrites() {
    let home = TempDir::new().unwrap();
    gazza(&home).arg("init").assert().success();
    std::fs::write(home.path().join("config.toml"), "broken").unwrap();

    gazza(&home).arg("init").arg("--force").assert().success();

    let config = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(config.contains("[airtable]"));
}
