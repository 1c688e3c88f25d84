//! Command line smoke tests for the `legalmind` binary

use assert_cmd::Command;
use predicates::prelude::*;

fn legalmind() -> Command {
    let mut cmd = Command::cargo_bin("legalmind").unwrap();
    cmd.env_remove("LEGALMIND_DARK")
        .env_remove("LEGALMIND_REPLY_DELAY_MS")
        .env_remove("LEGALMIND_CONFIG");
    cmd
}

#[test]
fn help_lists_options() {
    legalmind()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--directory"))
        .stdout(predicate::str::contains("--dark"))
        .stdout(predicate::str::contains("--hide-sidebar"))
        .stdout(predicate::str::contains("--reply-delay-ms"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn version_prints_package_version() {
    legalmind()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rejects_non_numeric_delay() {
    legalmind()
        .args(["--reply-delay-ms", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn missing_config_file_fails_before_ui() {
    let tmp = tempfile::tempdir().unwrap();
    legalmind()
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .env("XDG_STATE_HOME", tmp.path().join("state"))
        .env("HOME", tmp.path())
        .arg("--config")
        .arg(tmp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));

    assert!(tmp
        .path()
        .join("state/legalmind/legalmind-tui.log")
        .is_file());
}
