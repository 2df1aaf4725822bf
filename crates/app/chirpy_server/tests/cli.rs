//! Startup checks for the server binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn server() -> Command {
    let mut cmd = Command::cargo_bin("chirpy_server").unwrap();
    cmd.env_remove("JWT_SECRET")
        .env_remove("POLKA_KEY")
        .env_remove("PLATFORM")
        .env_remove("BIND_ADDR")
        .env("RUST_LOG", "info");
    cmd
}

#[test]
fn missing_jwt_secret_fails_before_serving() {
    server()
        .args(["--memory-store", "--polka-key", "k"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JWT_SECRET"));
}

#[test]
fn missing_polka_key_fails_before_serving() {
    server()
        .args(["--memory-store", "--jwt-secret", "s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("POLKA_KEY"));
}

#[test]
fn help_lists_options() {
    server()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--memory-store"))
        .stdout(predicate::str::contains("--jwt-secret"));
}
