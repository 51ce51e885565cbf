//! The `eventdesk` binary, end to end.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the host's config, `.env` and environment.
fn eventdesk(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("eventdesk").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("PORT")
        .env_remove("DATABASE_URL")
        .env_remove("AUTH_URL")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    eventdesk(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("entities"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    eventdesk(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    eventdesk(&home).assert().code(2);
}

#[test]
fn no_color_accepts_any_value() {
    let home = TempDir::new().unwrap();
    for value in ["1", "yes", "true", "0"] {
        eventdesk(&home)
            .env("NO_COLOR", value)
            .args(["entities", "--format", "json"])
            .assert()
            .success();
    }
}

#[test]
fn entities_as_json() {
    let home = TempDir::new().unwrap();
    let output = eventdesk(&home)
        .args(["entities", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let keys: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["categories", "tags", "events", "users"]);
}

#[test]
fn entities_table() {
    let home = TempDir::new().unwrap();
    eventdesk(&home)
        .arg("entities")
        .assert()
        .success()
        .stdout(predicate::str::contains("KEY"))
        .stdout(predicate::str::contains("/categories"));
}

#[test]
fn port_variable_reaches_config() {
    let home = TempDir::new().unwrap();
    eventdesk(&home)
        .args(["config", "get", "server.port"])
        .env("PORT", "4321")
        .assert()
        .success()
        .stdout(predicate::str::diff("4321\n"));
}

#[test]
fn prefixed_variables_reach_config() {
    let home = TempDir::new().unwrap();
    eventdesk(&home)
        .args(["config", "get", "database.max_connections"])
        .env("EVENTDESK__DATABASE__MAX_CONNECTIONS", "9")
        .assert()
        .success()
        .stdout(predicate::str::diff("9\n"));
}

#[test]
fn unknown_config_key_exits_with_configuration_code() {
    let home = TempDir::new().unwrap();
    eventdesk(&home)
        .args(["config", "get", "server.colour"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn missing_explicit_config_file() {
    let home = TempDir::new().unwrap();
    eventdesk(&home)
        .args(["--config", "absent.toml", "config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn init_writes_then_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("conf").join("eventdesk.toml");
    let path_arg = path.to_str().unwrap();

    eventdesk(&home)
        .args(["init", "--config", path_arg])
        .assert()
        .success();
    assert!(path.exists());

    eventdesk(&home)
        .args(["init", "--config", path_arg])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    eventdesk(&home)
        .args(["init", "--force", "--config", path_arg])
        .assert()
        .success();

    eventdesk(&home)
        .args(["--config", path_arg, "config", "get", "server.host"])
        .assert()
        .success()
        .stdout(predicate::str::diff("127.0.0.1\n"));
}

#[test]
fn file_values_are_read() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("desk.toml");
    std::fs::write(&path, "[server]\nport = 8088\n").unwrap();

    eventdesk(&home)
        .args(["--config", path.to_str().unwrap(), "config", "get", "server.port"])
        .assert()
        .success()
        .stdout(predicate::str::diff("8088\n"));
}

#[test]
fn migrate_creates_the_database() {
    let home = TempDir::new().unwrap();
    let db = home.path().join("desk.db");
    let url = format!("sqlite://{}", db.display());

    eventdesk(&home)
        .args(["migrate", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema at version 1"));
    assert!(db.exists());
}
