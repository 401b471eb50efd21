//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `opensdk` with an empty environment rooted in `home`.
fn opensdk(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("opensdk"));
    cmd.env_clear().env("HOME", home).env("XDG_CONFIG_HOME", home.join("config"));
    cmd
}

fn write_profile(home: &Path, file: &str, content: &str) {
    let dir = home.join("config").join("opensdk");
    fs::create_dir_all(&dir).expect("create config dir");
    fs::write(dir.join(file), content).expect("write config");
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().expect("home");
    opensdk(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("opensdk"));
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().expect("home");
    opensdk(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("foo"))
        .stdout(predicate::str::contains("bar"))
        .stdout(predicate::str::contains("cfg"))
        .stdout(predicate::str::contains("--config-file"))
        .stdout(predicate::str::contains("--no-interactive"));
}

#[test]
fn test_version_command() {
    let home = TempDir::new().expect("home");
    opensdk(home.path())
        .arg("version")
        .assert()
        .success()
        .stdout(format!("opensdk {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_environment_binds_flag() {
    let home = TempDir::new().expect("home");
    opensdk(home.path())
        .env("OPENSDK_ACCESS_TOKEN", "abc123")
        .args(["cfg", "get", "access-token"])
        .assert()
        .success()
        .stdout("abc123\n");
}

#[test]
fn test_flag_beats_environment_and_file() {
    let home = TempDir::new().expect("home");
    write_profile(home.path(), "main.toml", "account = \"file\"\ndomain = \"file.io\"\n");

    opensdk(home.path())
        .env("OPENSDK_ACCOUNT", "env")
        .args(["cfg", "get", "account", "--account", "flag"])
        .assert()
        .success()
        .stdout("flag\n");

    opensdk(home.path())
        .env("OPENSDK_ACCOUNT", "env")
        .args(["cfg", "get", "account"])
        .assert()
        .success()
        .stdout("env\n");

    opensdk(home.path())
        .args(["cfg", "get", "domain"])
        .assert()
        .success()
        .stdout("file.io\n");
}

#[test]
fn test_profile_environment_selects_file() {
    let home = TempDir::new().expect("home");
    write_profile(home.path(), "main.toml", "domain = \"main.io\"\n");
    write_profile(home.path(), "dev.yaml", "domain: dev.io\n");

    opensdk(home.path())
        .env("OPENSDK_PROFILE", "dev")
        .args(["cfg", "get", "domain"])
        .assert()
        .success()
        .stdout("dev.io\n");

    opensdk(home.path())
        .env("OPENSDK_PROFILE", "dev")
        .args(["--profile", "main", "cfg", "get", "domain"])
        .assert()
        .success()
        .stdout("main.io\n");
}

#[test]
fn test_config_file_flag_beats_environment() {
    let home = TempDir::new().expect("home");
    let x = home.path().join("x.yaml");
    let y = home.path().join("y.yaml");
    fs::write(&x, "query: from-x\n").expect("write x");
    fs::write(&y, "query: from-y\n").expect("write y");

    opensdk(home.path())
        .env("OPENSDK_CONFIG_FILE", &y)
        .arg(format!("--config-file={}", x.display()))
        .args(["cfg", "get", "query"])
        .assert()
        .success()
        .stdout("from-x\n");

    opensdk(home.path())
        .env("OPENSDK_CONFIG_FILE", &y)
        .args(["cfg", "get", "query"])
        .assert()
        .success()
        .stdout("from-y\n");
}

#[test]
fn test_missing_config_file_is_not_an_error() {
    let home = TempDir::new().expect("home");
    opensdk(home.path())
        .env("OPENSDK_PAGE", "3")
        .args(["--config-file", "/nonexistent/opensdk.toml", "cfg", "get", "page"])
        .assert()
        .success()
        .stdout("3\n");
}

#[test]
fn test_missing_config_file_without_extension_is_not_an_error() {
    let home = TempDir::new().expect("home");
    opensdk(home.path())
        .args(["--config-file", "/nonexistent/opensdk", "version"])
        .assert()
        .success()
        .stdout(format!("opensdk {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_format_is_rejected() {
    let home = TempDir::new().expect("home");
    opensdk(home.path())
        .args(["version", "--format=xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("flag \"format\" has invalid value \"xml\""))
        .stderr(predicate::str::contains("Usage").not());
}

#[test]
fn test_malformed_explicit_config_fails() {
    let home = TempDir::new().expect("home");
    let path = home.path().join("broken.toml");
    fs::write(&path, "account = \n").expect("write");

    opensdk(home.path())
        .arg("--config-file")
        .arg(&path)
        .arg("version")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml"));
}

#[test]
fn test_malformed_discovered_config_warns() {
    let home = TempDir::new().expect("home");
    write_profile(home.path(), "main.json", "{ not json");

    opensdk(home.path())
        .arg("version")
        .assert()
        .success()
        .stderr(predicate::str::contains("main.json"));
}

#[test]
fn test_foo_requires_access_token() {
    let home = TempDir::new().expect("home");
    opensdk(home.path())
        .arg("foo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENSDK_ACCESS_TOKEN"));
}

#[test]
fn test_foo_renders_request_as_json() {
    let home = TempDir::new().expect("home");
    let output = opensdk(home.path())
        .env("OPENSDK_ACCESS_TOKEN", "abc123")
        .env("OPENSDK_SANDBOX", "true")
        .args(["foo", "--account", "acme", "--per-page=5", "--format", "json"])
        .output()
        .expect("run foo");
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(parsed["account"], "acme");
    assert_eq!(parsed["per-page"], 5);
    assert_eq!(parsed["sandbox"], true);
    assert_eq!(parsed["endpoint"], "https://api.sandbox.opensdk.dev");
}

#[test]
fn test_bar_echoes_body_from_file() {
    let home = TempDir::new().expect("home");
    let body = home.path().join("record.yaml");
    fs::write(&body, "name: www\ntype: CNAME\n").expect("write body");

    opensdk(home.path())
        .env("OPENSDK_ACCESS_TOKEN", "abc123")
        .arg("bar")
        .arg("--from-file")
        .arg(&body)
        .args(["--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("type: CNAME"));
}

#[test]
fn test_cfg_set_writes_profile_file() {
    let home = TempDir::new().expect("home");

    opensdk(home.path())
        .args(["cfg", "set", "account", "acme", "--confirm"])
        .assert()
        .success();

    let written = home.path().join("config").join("opensdk").join("main.toml");
    assert!(fs::read_to_string(&written).expect("config written").contains("acme"));

    opensdk(home.path())
        .args(["cfg", "get", "account"])
        .assert()
        .success()
        .stdout("acme\n");
}

#[test]
fn test_cfg_repairs_invalid_value_in_profile_file() {
    let home = TempDir::new().expect("home");
    write_profile(home.path(), "main.toml", "format = \"xml\"\n");

    opensdk(home.path())
        .arg("version")
        .assert()
        .failure()
        .stderr(predicate::str::contains("flag \"format\" has invalid value \"xml\""));

    opensdk(home.path())
        .args(["cfg", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("value: xml"));

    opensdk(home.path())
        .args(["cfg", "set", "format", "json", "--confirm"])
        .assert()
        .success();

    let written = home.path().join("config").join("opensdk").join("main.toml");
    assert!(fs::read_to_string(&written).expect("config written").contains("format = \"json\""));

    opensdk(home.path())
        .args(["cfg", "get", "format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": \"json\""));

    opensdk(home.path()).arg("version").assert().success();
}

#[test]
fn test_cfg_set_refuses_without_confirmation() {
    let home = TempDir::new().expect("home");
    opensdk(home.path())
        .args(["cfg", "set", "account", "acme", "--no-interactive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));
}

#[test]
fn test_output_flag_writes_file() {
    let home = TempDir::new().expect("home");
    let target = home.path().join("out.json");

    opensdk(home.path())
        .arg("version")
        .args(["--format", "json", "--output"])
        .arg(&target)
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(&target).expect("output written");
    assert!(written.contains("\"version\""));
}

#[test]
fn test_completion_generates_script() {
    let home = TempDir::new().expect("home");
    opensdk(home.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("opensdk"));
}
