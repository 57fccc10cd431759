//! Integration tests for `cxpack detect`.
//!
//! Detection works entirely from `VCAP_SERVICES`, so every test pins that
//! variable explicitly and runs against a throwaway build directory.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cxpack() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cxpack"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("VCAP_SERVICES");
    cmd.env_remove("VCAP_APPLICATION");
    cmd
}

fn vcap_with_iast_binding() -> String {
    serde_json::json!({
        "user-provided": [{
            "name": "checkmarx-iast",
            "label": "user-provided",
            "tags": [],
            "credentials": { "iast_server": "https://cx.local" }
        }]
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// Applicability
// ---------------------------------------------------------------------------

#[test]
fn test_detect_prints_component_token_when_bound() {
    let build = TempDir::new().expect("build dir");
    cxpack()
        .args(["detect", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", vcap_with_iast_binding())
        .assert()
        .success()
        .stdout("cx-iast-agent\n");
}

#[test]
fn test_detect_exits_100_without_bindings() {
    let build = TempDir::new().expect("build dir");
    cxpack()
        .args(["detect", &build.path().to_string_lossy()])
        .assert()
        .code(100)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_detect_exits_100_when_no_binding_matches() {
    let build = TempDir::new().expect("build dir");
    let services = serde_json::json!({
        "p-mysql": [{ "name": "orders-db", "tags": ["mysql"] }]
    })
    .to_string();
    cxpack()
        .args(["detect", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", services)
        .assert()
        .code(100)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_detect_matches_on_tags() {
    let build = TempDir::new().expect("build dir");
    let services = serde_json::json!({
        "user-provided": [{
            "name": "iast",
            "tags": ["security", "checkmarx"],
            "credentials": { "iast_server": "https://cx.local" }
        }]
    })
    .to_string();
    cxpack()
        .args(["detect", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", services)
        .assert()
        .success()
        .stdout("cx-iast-agent\n");
}

// ---------------------------------------------------------------------------
// Ambiguity and errors
// ---------------------------------------------------------------------------

#[test]
fn test_detect_declines_ambiguous_bindings_with_a_warning() {
    let build = TempDir::new().expect("build dir");
    let services = serde_json::json!({
        "user-provided": [
            { "name": "checkmarx-a", "credentials": { "iast_server": "https://a" } },
            { "name": "checkmarx-b", "credentials": { "iast_server": "https://b" } }
        ]
    })
    .to_string();
    cxpack()
        .args(["detect", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", services)
        .assert()
        .code(100)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("bind exactly one"));
}

#[test]
fn test_detect_fails_on_malformed_services_document() {
    let build = TempDir::new().expect("build dir");
    cxpack()
        .args(["detect", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", "not json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("VCAP_SERVICES"));
}

#[test]
fn test_detect_token_stays_clean_under_verbose() {
    // The orchestrator parses stdout; diagnostics must stay on stderr even
    // with detail turned all the way up.
    let build = TempDir::new().expect("build dir");
    cxpack()
        .args(["detect", "--verbose", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", vcap_with_iast_binding())
        .assert()
        .success()
        .stdout("cx-iast-agent\n");
}
