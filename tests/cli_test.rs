//! Integration tests for the oops binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("oops.yaml"), config).unwrap();
    temp
}

fn oops(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("oops"));
    cmd.current_dir(temp.path())
        .env_remove("OOPS_CONFIG")
        .env_remove("OOPS_DEFAULTS");
    cmd
}

const DISABLED_CONFIG: &str = r#"
checks:
  network:
    enabled: false
"#;

// Only a closed local port, so every probe fails fast.
const UNREACHABLE_CONFIG: &str = r#"
checks:
  network:
    enabled: true
    disable_defaults: [git_repos]
    pypi_sources:
      - url: "http://127.0.0.1:1/simple/"
        name: Local
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("oops"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Pre-flight diagnostics"))
        .stdout(predicate::str::contains("network"))
        .stdout(predicate::str::contains("targets"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("oops"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_network_disabled_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(DISABLED_CONFIG);
    oops(&temp)
        .arg("network")
        .assert()
        .success()
        .stdout(predicate::str::contains("网络检测已禁用"))
        .stdout(predicate::str::contains("skipped"));
    Ok(())
}

#[test]
fn cli_no_args_runs_network() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(DISABLED_CONFIG);
    oops(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("网络检测已禁用"));
    Ok(())
}

#[test]
fn cli_network_json_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(DISABLED_CONFIG);
    let output = oops(&temp)
        .args(["network", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["status"], "skipped");
    assert_eq!(json["message"], "网络检测已禁用");
    assert_eq!(json["fix_suggestion"], "");
    assert!(json["details"].as_object().unwrap().is_empty());
    Ok(())
}

#[test]
fn cli_network_unreachable_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(UNREACHABLE_CONFIG);
    let output = oops(&temp)
        .args(["network", "--format", "json", "--timeout", "2", "--no-dynamic"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["status"], "error");
    let details = json["details"].as_object().unwrap();
    assert!(details.contains_key("http://127.0.0.1:1/simple/_(direct)"));
    assert!(details.contains_key("http://127.0.0.1:1/simple/_(proxy)"));
    // Nothing listens on port 1, so the direct path is a transport error.
    assert_eq!(
        json["details"]["http://127.0.0.1:1/simple/_(direct)"]["status"],
        "error"
    );
    assert_eq!(
        json["fix_suggestion"],
        "PyPI源: 全部失败，请检查网络连接或更换镜像源"
    );
    Ok(())
}

#[test]
fn cli_network_unreachable_text_shows_summary() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(UNREACHABLE_CONFIG);
    oops(&temp)
        .args(["network", "--timeout", "2", "--no-dynamic", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("网络检测完成，共检测 1 个目标 (2 次探测)"))
        .stdout(predicate::str::contains("PyPI源: ❌ 全部失败 (2个)"))
        .stdout(predicate::str::contains("更换镜像源"));
    Ok(())
}

#[test]
fn cli_network_rejects_zero_timeout() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(DISABLED_CONFIG);
    oops(&temp)
        .args(["network", "--timeout", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("--timeout must be at least 1 second"));
    Ok(())
}

#[test]
fn cli_missing_config_exits_with_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    oops(&temp)
        .arg("network")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("No configuration found"));
    Ok(())
}

#[test]
fn cli_config_flag_overrides_location() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = temp.path().join("custom.yaml");
    fs::write(&path, DISABLED_CONFIG)?;
    oops(&temp)
        .args(["network", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("网络检测已禁用"));
    Ok(())
}

#[test]
fn cli_targets_lists_builtin_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("checks:\n  network:\n    enabled: true\n");
    oops(&temp)
        .arg("targets")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://github.com"))
        .stdout(predicate::str::contains("https://pypi.org/simple/"))
        .stdout(predicate::str::contains("3 target(s)"));
    Ok(())
}

#[test]
fn cli_targets_reads_defaults_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        "checks:\n  network:\n    enabled: true\n    mirror_sites: ['https://mirrors.example.com']\n",
    );
    fs::create_dir_all(temp.path().join("configs"))?;
    fs::write(
        temp.path().join("configs/defaults.yaml"),
        "network_defaults:\n  git_repos: ['https://git.example.com/repo.git']\n",
    )?;

    let output = oops(&temp).args(["targets", "--json"]).output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let urls: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["url"].as_str().unwrap())
        .collect();
    assert_eq!(
        urls,
        vec!["https://git.example.com/repo.git", "https://mirrors.example.com"]
    );
    Ok(())
}

#[test]
fn cli_targets_disabled() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(DISABLED_CONFIG);
    oops(&temp)
        .arg("targets")
        .assert()
        .success()
        .stdout(predicate::str::contains("网络检测已禁用"));
    Ok(())
}
