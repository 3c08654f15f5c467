//! CLI interface tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn kodebase_config() -> Command {
    Command::cargo_bin("kodebase-config").unwrap()
}

#[test]
fn test_version_flag() {
    kodebase_config()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kodebase-config"));
}

#[test]
fn test_help_flag() {
    kodebase_config()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kodebase git automation settings"));
}

#[test]
fn test_show_without_config_prints_defaults() {
    let temp_dir = TempDir::new().unwrap();

    kodebase_config()
        .arg("--project-root")
        .arg(temp_dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains(".kodebase/artifacts"))
        .stdout(predicate::str::contains("strategy: cascade_pr"));
}

#[test]
fn test_validate_missing_config() {
    let temp_dir = TempDir::new().unwrap();

    kodebase_config()
        .arg("--project-root")
        .arg(temp_dir.path())
        .arg("validate")
        .assert()
        .failure()
        .code(1) // Configuration error
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_init_then_validate() {
    let temp_dir = TempDir::new().unwrap();

    kodebase_config()
        .arg("--project-root")
        .arg(temp_dir.path())
        .args(["init", "--preset", "solo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("preset 'solo'"));

    let written =
        fs::read_to_string(temp_dir.path().join(".kodebase/config/settings.yml")).unwrap();
    assert!(written.contains("strategy: direct_commit"));

    kodebase_config()
        .arg("--project-root")
        .arg(temp_dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid:"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("settings.yml");
    fs::write(&config, "version: '1.0'\n").unwrap();

    kodebase_config()
        .arg("--project-root")
        .arg(temp_dir.path())
        .args(["--config", "settings.yml", "init", "--preset", "enterprise"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&config).unwrap(), "version: '1.0'\n");
}

#[test]
fn test_init_unknown_preset() {
    kodebase_config()
        .args(["init", "--preset", "galactic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Available presets"));
}

#[test]
fn test_validation_failure_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("settings.yml"),
        "gitOps:\n  post_merge:\n    strategy: bogus\n  platform:\n    type: svn\n",
    )
    .unwrap();

    kodebase_config()
        .arg("--project-root")
        .arg(temp_dir.path())
        .args(["--config", "settings.yml", "validate"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("gitOps.post_merge.strategy"))
        .stderr(predicate::str::contains("gitOps.platform.type"));
}

#[test]
fn test_parse_failure_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("settings.yml"), "gitOps: [oops\n").unwrap();

    kodebase_config()
        .arg("--project-root")
        .arg(temp_dir.path())
        .args(["--config", "settings.yml", "show"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse YAML"));
}

#[test]
fn test_migrate_unsupported_version() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("settings.yml"), "version: '1.0'\n").unwrap();

    kodebase_config()
        .arg("--project-root")
        .arg(temp_dir.path())
        .args(["--config", "settings.yml", "migrate", "--from", "9.9"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Unsupported configuration version: 9.9"));
}

#[test]
fn test_migrate_prints_report() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("settings.yml"), "version: '1.0'\n").unwrap();

    kodebase_config()
        .arg("--project-root")
        .arg(temp_dir.path())
        .args(["--config", "settings.yml", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected version: 1.0"));
}

#[test]
fn test_presets_lists_all() {
    kodebase_config()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("solo"))
        .stdout(predicate::str::contains("small_team"))
        .stdout(predicate::str::contains("enterprise"))
        .stdout(predicate::str::contains("default"));
}
