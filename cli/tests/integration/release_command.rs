//! Integration tests for `cxpack release`.
//!
//! Each test seeds the build directory the way a prior `stage` run would
//! have left it, then asserts on the java-opts accumulator and the
//! appended override properties.

#![allow(clippy::expect_used)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cxpack() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cxpack"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("VCAP_SERVICES");
    cmd.env_remove("VCAP_APPLICATION");
    cmd.env_remove("CXPACK_APP_ROOT");
    cmd
}

fn vcap_services() -> String {
    serde_json::json!({
        "user-provided": [{
            "name": "checkmarx-iast",
            "credentials": { "iast_server": "https://cx.local" }
        }]
    })
    .to_string()
}

fn vcap_application(name: &str) -> String {
    serde_json::json!({ "application_name": name, "limits": { "mem": 1024 } }).to_string()
}

/// Create the sandbox a successful stage leaves behind.
fn seed_sandbox(build_dir: &Path) {
    let sandbox = build_dir.join(".java-buildpack").join("cx_iast_agent");
    std::fs::create_dir_all(&sandbox).expect("sandbox dir");
    std::fs::write(sandbox.join("cx-launcher.jar"), b"launcher-bytes").expect("launcher");
    std::fs::write(sandbox.join("cx_agent.override.properties"), "mode=web\n").expect("properties");
}

fn java_opts_path(build_dir: &Path) -> std::path::PathBuf {
    build_dir.join(".java-buildpack").join("java-opts")
}

// ---------------------------------------------------------------------------
// Launch configuration
// ---------------------------------------------------------------------------

#[test]
fn test_release_writes_flags_and_appends_properties() {
    let build = TempDir::new().expect("build dir");
    seed_sandbox(build.path());

    cxpack()
        .args(["release", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", vcap_services())
        .env("VCAP_APPLICATION", vcap_application("my-app"))
        .assert()
        .success()
        .stderr(predicate::str::contains("IAST agent configured for 'my-app'"));

    let opts = std::fs::read_to_string(java_opts_path(build.path())).expect("java-opts");
    assert_eq!(
        opts,
        "-DcxAppTag=my-app\n\
         -DcxTeam=CxServer\n\
         -Diast.home=/home/vcap/app/.java-buildpack/cx_iast_agent\n\
         -Xverify:none\n\
         -javaagent:/home/vcap/app/.java-buildpack/cx_iast_agent/cx-launcher.jar\n"
    );

    let properties = std::fs::read_to_string(
        build
            .path()
            .join(".java-buildpack")
            .join("cx_iast_agent")
            .join("cx_agent.override.properties"),
    )
    .expect("overrides");
    assert_eq!(
        properties,
        "mode=web\ncxIastServer=https://cx.local\niast_server=https://cx.local\n"
    );
}

#[test]
fn test_release_honors_the_app_root_override() {
    let build = TempDir::new().expect("build dir");
    seed_sandbox(build.path());

    cxpack()
        .args(["release", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", vcap_services())
        .env("VCAP_APPLICATION", vcap_application("my-app"))
        .env("CXPACK_APP_ROOT", "/srv/app")
        .assert()
        .success();

    let opts = std::fs::read_to_string(java_opts_path(build.path())).expect("java-opts");
    assert!(opts.contains("-Diast.home=/srv/app/.java-buildpack/cx_iast_agent\n"));
    assert!(opts.contains("-javaagent:/srv/app/.java-buildpack/cx_iast_agent/cx-launcher.jar\n"));
    assert!(!opts.contains("/home/vcap"));
}

#[test]
fn test_release_preserves_existing_java_opts() {
    let build = TempDir::new().expect("build dir");
    seed_sandbox(build.path());
    std::fs::write(java_opts_path(build.path()), "-Xmx512m\n").expect("seed java-opts");

    cxpack()
        .args(["release", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", vcap_services())
        .env("VCAP_APPLICATION", vcap_application("my-app"))
        .assert()
        .success();

    let opts = std::fs::read_to_string(java_opts_path(build.path())).expect("java-opts");
    assert!(opts.starts_with("-Xmx512m\n-DcxAppTag=my-app\n"));
}

// ---------------------------------------------------------------------------
// Skips and failures
// ---------------------------------------------------------------------------

#[test]
fn test_release_skips_cleanly_without_a_binding() {
    // No VCAP_APPLICATION either: an unbound application must release
    // without demanding platform identity.
    let build = TempDir::new().expect("build dir");
    seed_sandbox(build.path());

    cxpack()
        .args(["release", &build.path().to_string_lossy()])
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to configure"));

    assert!(!java_opts_path(build.path()).exists());
}

#[test]
fn test_release_requires_vcap_application_when_bound() {
    let build = TempDir::new().expect("build dir");
    seed_sandbox(build.path());

    cxpack()
        .args(["release", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", vcap_services())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("VCAP_APPLICATION"));

    assert!(!java_opts_path(build.path()).exists());
}

#[test]
fn test_release_without_a_staged_sandbox_is_an_error() {
    let build = TempDir::new().expect("build dir");

    cxpack()
        .args(["release", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", vcap_services())
        .env("VCAP_APPLICATION", vcap_application("my-app"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Stage the agent before release"));

    assert!(!java_opts_path(build.path()).exists());
}

#[test]
fn test_release_without_the_credential_writes_nothing() {
    let build = TempDir::new().expect("build dir");
    seed_sandbox(build.path());
    let services = serde_json::json!({
        "user-provided": [{
            "name": "checkmarx-iast",
            "credentials": { "teamTag": "backend" }
        }]
    })
    .to_string();

    cxpack()
        .args(["release", &build.path().to_string_lossy()])
        .env("VCAP_SERVICES", services)
        .env("VCAP_APPLICATION", vcap_application("my-app"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("iast_server"));

    assert!(!java_opts_path(build.path()).exists());
    let properties = std::fs::read_to_string(
        build
            .path()
            .join(".java-buildpack")
            .join("cx_iast_agent")
            .join("cx_agent.override.properties"),
    )
    .expect("overrides");
    assert_eq!(properties, "mode=web\n");
}
