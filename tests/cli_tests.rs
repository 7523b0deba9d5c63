//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("theophanie-utils"))
}

#[test]
fn test_cli_help() {
    let mut cmd = bin();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--settings"))
        .stdout(predicate::str::contains("--env"))
        .stdout(predicate::str::contains("--log_console"))
        .stdout(predicate::str::contains("--log_level"))
        .stdout(predicate::str::contains("--log_info_file"))
        .stdout(predicate::str::contains("--log_crit_file"));
}

#[test]
fn test_cli_rejects_unrecognized_option() {
    let mut cmd = bin();
    cmd.arg("--bogus=1");
    cmd.assert().failure().code(2).stderr(predicate::str::contains("unrecognized option"));
}

#[test]
fn test_cli_rejects_bad_log_level() {
    let tmp = TempDir::new().expect("tmp");
    let settings = tmp.path().join("settings.ini");
    fs::write(&settings, "[app]\nname = theophanie\n").expect("write settings");

    let mut cmd = bin();
    cmd.args([
        "--settings",
        settings.to_str().expect("utf8 path"),
        "--log_level=55",
        "--log_console=false",
    ]);
    cmd.assert().failure().stderr(predicate::str::contains("invalid value for --log_level"));
}

#[test]
fn test_cli_bootstraps_from_temp_configuration() {
    let tmp = TempDir::new().expect("tmp");
    let settings = tmp.path().join("settings.ini");
    let env_file = tmp.path().join(".env");
    fs::write(&settings, "[app]\nname = theophanie\n").expect("write settings");
    fs::write(&env_file, "THEOPHANIE_SMOKE=1\n").expect("write env file");

    let mut cmd = bin();
    cmd.args([
        "--settings",
        settings.to_str().expect("utf8 path"),
        "--env",
        env_file.to_str().expect("utf8 path"),
        "--log_console=false",
    ]);
    cmd.assert().success();
}

#[test]
fn test_cli_fails_on_missing_settings_file() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = bin();
    cmd.args([
        "--settings",
        tmp.path().join("absent.ini").to_str().expect("utf8 path"),
        "--log_console=false",
    ]);
    cmd.assert().failure().stderr(predicate::str::contains("failed to load settings"));
}

#[test]
fn test_cli_writes_the_info_log_file() {
    let tmp = TempDir::new().expect("tmp");
    let settings = tmp.path().join("settings.ini");
    let env_file = tmp.path().join(".env");
    let info_log = tmp.path().join("logs/info.log");
    fs::write(&settings, "[app]\nname = theophanie\n").expect("write settings");
    fs::write(&env_file, "").expect("write env file");

    let mut cmd = bin();
    cmd.args([
        "--settings",
        settings.to_str().expect("utf8 path"),
        "--env",
        env_file.to_str().expect("utf8 path"),
        "--log_console=false",
        "--log_info_file",
        info_log.to_str().expect("utf8 path"),
    ]);
    cmd.assert().success();

    let logged = fs::read_to_string(&info_log).expect("info log written");
    assert!(logged.contains("given options:"), "log was: {logged}");
    assert!(logged.contains("--log_console=false"), "log was: {logged}");
}
