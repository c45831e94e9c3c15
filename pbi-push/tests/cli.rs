use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::write;
use tempfile::NamedTempFile;

/// Creates a minimal config file for the CLI to read.
fn create_minimal_config() -> NamedTempFile {
    let config = NamedTempFile::new().expect("Creating temp config file failed");
    write(config.path(), b"input:\n  dir: ./Data\n").expect("Writing temp config failed");
    config
}

#[test]
fn publish_fails_fast_when_credentials_are_missing() {
    let config = create_minimal_config();

    let mut cmd = Command::cargo_bin("pbi-push").expect("Binary exists");
    cmd.arg("publish")
        .arg("--config")
        .arg(config.path())
        .env_remove("TENANT_ID")
        .env_remove("CLIENT_ID")
        .env_remove("CLIENT_SECRET")
        .env_remove("WORKSPACE_ID")
        .env_remove("REPORT_ID");

    // No credentials in the environment: the run must end unsuccessfully
    // before any network call, naming the first missing variable.
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("TENANT_ID"));
}

#[test]
fn help_lists_the_publish_subcommand() {
    let mut cmd = Command::cargo_bin("pbi-push").expect("Binary exists");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("publish"));
}
