use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("clx")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--api-url"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("clx")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("clx")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_whoami_without_session() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("clx")
        .env("CLX_HOME", dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_whoami_with_stored_session() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("session.json"),
        r#"{"token":"tkn1","user":{"id":7,"name":"Ann","email":"a@b.com"}}"#,
    )
    .unwrap();

    cargo_bin_cmd!("clx")
        .env("CLX_HOME", dir.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ann <a@b.com>"));
}

#[test]
fn test_logout_clears_stored_session() {
    let dir = tempdir().unwrap();
    let session_path = dir.path().join("session.json");
    std::fs::write(
        &session_path,
        r#"{"token":"tkn1","user":{"id":7,"name":"Ann","email":"a@b.com"}}"#,
    )
    .unwrap();

    cargo_bin_cmd!("clx")
        .env("CLX_HOME", dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    // The cleared state is persisted: a second logout finds nothing.
    let contents = std::fs::read_to_string(&session_path).unwrap();
    assert_eq!(contents.trim(), "null");

    cargo_bin_cmd!("clx")
        .env("CLX_HOME", dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active session."));
}
