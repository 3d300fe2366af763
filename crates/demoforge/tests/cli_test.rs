use assert_cmd::Command;
use predicates::prelude::*;

/// Help lists the three subcommands
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("demoforge").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("reset"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("demoforge").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("demoforge"));
}

/// Setup help shows the project and service-name options
#[test]
fn test_setup_help() {
    let mut cmd = Command::cargo_bin("demoforge").unwrap();
    cmd.arg("setup")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--project"))
        .stdout(predicate::str::contains("--service-name"))
        .stdout(predicate::str::contains("automation-demo-service"));
}

/// A missing key file is a fatal precondition failure (exit code 1)
#[test]
fn test_init_with_missing_creds() {
    let mut cmd = Command::cargo_bin("demoforge").unwrap();
    cmd.arg("init")
        .arg("--creds")
        .arg("/no/such/service-account.json")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

/// An unparsable key file is rejected before any cloud call
#[test]
fn test_setup_with_invalid_creds() {
    let dir = tempfile::tempdir().unwrap();
    let key = dir.path().join("key.json");
    std::fs::write(&key, "{\"type\": \"authorized_user\"}").unwrap();

    let mut cmd = Command::cargo_bin("demoforge").unwrap();
    cmd.arg("setup")
        .arg("--creds")
        .arg(&key)
        .arg("--project")
        .arg("demo")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid service account key"));
}

/// --project is required for setup
#[test]
fn test_setup_requires_project() {
    let mut cmd = Command::cargo_bin("demoforge").unwrap();
    cmd.arg("setup")
        .arg("--creds")
        .arg("/no/such/service-account.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--project"));
}

/// --project is required for reset
#[test]
fn test_reset_requires_project() {
    let mut cmd = Command::cargo_bin("demoforge").unwrap();
    cmd.arg("reset")
        .arg("--creds")
        .arg("/no/such/service-account.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--project"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("demoforge").unwrap();
    cmd.arg("launch").assert().failure();
}
