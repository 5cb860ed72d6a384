//! End-to-end CLI tests against the shared fixtures in `tests/fixtures/`.
//!
//! Commands run with the fixtures directory as working directory so report paths (and
//! therefore fingerprints) are stable.

use assert_cmd::Command;
use ccheck_test_util::normalize_nondeterministic;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn ccheck_cmd() -> Command {
    Command::cargo_bin("ccheck").expect("ccheck binary not found - run `cargo build` first")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("ccheck-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

fn in_fixtures() -> Command {
    let mut cmd = ccheck_cmd();
    cmd.current_dir(fixtures_dir());
    cmd
}

#[test]
fn passing_file_prints_passed() {
    in_fixtures()
        .args(["-p", "policies", "configs/service.json"])
        .assert()
        .success()
        .stdout("Passed: configs/service.json\n");
}

#[test]
fn warnings_alone_exit_zero() {
    in_fixtures()
        .args(["-p", "policies", "configs/hpa_pair.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Warning: configs/hpa_pair.yaml - hello-kubernetes should not be configured to live in the default namespace",
        ));
}

#[test]
fn strict_mode_turns_warnings_into_failures() {
    in_fixtures()
        .args(["-s", "-p", "policies", "configs/hpa_pair.yaml"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "Failure: configs/hpa_pair.yaml - hello-kubernetes should not be configured",
        ))
        .stdout(predicate::str::contains("Warning:").not());
}

#[test]
fn failure_exits_two() {
    in_fixtures()
        .args(["--policy", "policies", "configs/deployment_only.yaml"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "Failure: configs/deployment_only.yaml - hello-kubernetes must be paired with a Horizontal Pod AutoScaler",
        ));
}

#[test]
fn broken_policy_is_a_runtime_error_naming_the_file() {
    in_fixtures()
        .args(["-p", "policies-broken", "configs/service.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("broken.rego"));
}

#[test]
fn missing_policy_directory_is_a_runtime_error() {
    in_fixtures()
        .args(["-p", "no-such-dir", "configs/service.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no-such-dir"));
}

#[test]
fn unsupported_format_fails_only_that_file() {
    in_fixtures()
        .args(["-p", "policies", "configs/deployment.toml", "configs/service.json"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Error: configs/deployment.toml - "))
        .stdout(predicate::str::contains("Passed: configs/service.json"));
}

#[test]
fn fail_fast_aborts_on_decode_error() {
    in_fixtures()
        .args([
            "--fail-fast",
            "-p",
            "policies",
            "configs/service.json",
            "configs/malformed.yaml",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed.yaml"));
}

#[test]
fn unknown_namespace_passes_everything() {
    in_fixtures()
        .args(["-p", "policies", "-n", "other", "configs/deployment_only.yaml"])
        .assert()
        .success()
        .stdout("Passed: configs/deployment_only.yaml\n");
}

#[test]
fn config_file_supplies_settings() {
    let tmp = TempDir::new().expect("temp dir");
    let config = tmp.path().join("ccheck.toml");
    std::fs::write(&config, "policy = \"policies\"\nstrict = true\n").expect("write config");

    in_fixtures()
        .arg("--config")
        .arg(&config)
        .arg("configs/hpa_pair.yaml")
        .assert()
        .code(2);
}

#[test]
fn invalid_config_is_a_runtime_error() {
    let tmp = TempDir::new().expect("temp dir");
    let config = tmp.path().join("ccheck.toml");
    std::fs::write(&config, "namespace = \"\"\n").expect("write config");

    in_fixtures()
        .arg("--config")
        .arg(&config)
        .args(["-p", "policies", "configs/service.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("namespace"));
}

#[test]
fn json_report_matches_expected() {
    let tmp = TempDir::new().expect("temp dir");
    let report_path = tmp.path().join("out/report.json");

    let output = in_fixtures()
        .args(["-p", "policies", "--format", "json", "--report-out"])
        .arg(&report_path)
        .args(["configs/hpa_pair.yaml", "configs/deployment_only.yaml"])
        .output()
        .expect("run ccheck");
    assert_eq!(output.status.code(), Some(2));

    let stdout: Value = serde_json::from_slice(&output.stdout).expect("stdout is json");
    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("report is json");
    let expected: Value = serde_json::from_str(
        &std::fs::read_to_string(fixtures_dir().join("reports/hpa.report.json"))
            .expect("read expected report"),
    )
    .expect("expected report is json");

    assert_eq!(normalize_nondeterministic(stdout), expected);
    assert_eq!(normalize_nondeterministic(written), expected);
}

#[test]
fn github_format_emits_annotations() {
    in_fixtures()
        .args(["-p", "policies", "--format", "github", "configs/deployment_only.yaml"])
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with(
            "::error file=configs/deployment_only.yaml::",
        ));
}
