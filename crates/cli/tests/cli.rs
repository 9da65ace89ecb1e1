use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn libris() -> Command {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    cmd.env_remove("LIBRIS_ENV")
        .env_remove("LIBRIS_CONFIG_DIR")
        .env_remove("LIBRIS_SERVER__PORT")
        .env_remove("LIBRIS_SERVER__HOST");
    cmd
}

fn show_config(dir: &Path) -> Command {
    let mut cmd = libris();
    cmd.args(["--config-dir", dir.to_str().unwrap(), "show-config"]);
    cmd
}

#[test]
fn help_lists_subcommands() {
    libris()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("show-config"));
}

#[test]
fn show_config_reads_the_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("base.toml"), "[server]\nport = 7070\n").unwrap();

    show_config(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"port\": 7070"))
        .stdout(predicate::str::contains("\"seed_sample_catalog\": false"));
}

#[test]
fn environment_file_overrides_base() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("base.toml"),
        "[server]\nhost = \"127.0.0.1\"\nport = 7070\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("staging.toml"), "[server]\nport = 7171\n").unwrap();

    show_config(dir.path())
        .env("LIBRIS_ENV", "staging")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"environment\": \"staging\""))
        .stdout(predicate::str::contains("\"port\": 7171"))
        .stdout(predicate::str::contains("\"host\": \"127.0.0.1\""));
}

#[test]
fn environment_variables_override_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("base.toml"), "[server]\nport = 7070\n").unwrap();
    std::fs::write(dir.path().join("staging.toml"), "[server]\nport = 7171\n").unwrap();

    show_config(dir.path())
        .env("LIBRIS_ENV", "staging")
        .env("LIBRIS_SERVER__PORT", "7272")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"port\": 7272"));
}

#[test]
fn config_dir_can_come_from_the_environment() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("base.toml"), "[server]\nport = 7373\n").unwrap();

    libris()
        .env("LIBRIS_CONFIG_DIR", dir.path())
        .arg("show-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"port\": 7373"));
}

#[test]
fn unknown_environment_fails() {
    libris()
        .env("LIBRIS_ENV", "qa")
        .arg("show-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported environment"));
}
