use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("vapte")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("download"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("vapte")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_upload_help_shows_template_arg() {
    cargo_bin_cmd!("vapte")
        .args(["upload", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TEMPLATE"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("vapte")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.2"));
}
