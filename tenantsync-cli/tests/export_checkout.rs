//! CLI smoke tests over a local checkout and the filesystem provider.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

fn checkout_with_config() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let tenant = dir.path().join("checkout").join("tenant");
    std::fs::create_dir_all(tenant.join("rules")).unwrap();
    std::fs::write(tenant.join("tenant.json"), r#"{ "friendly_name": "t" }"#).unwrap();
    std::fs::write(tenant.join("rules").join("rule1.js"), "function rule1() {}").unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{ "TYPE": "filesystem", "PROJECT_PATH": "tenant" }"#,
    )
    .unwrap();
    dir
}

fn tenantsync() -> Command {
    Command::cargo_bin("tenantsync").expect("binary")
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_writes_bundle_file_and_summary() {
    let dir = checkout_with_config();
    let out = dir.path().join("bundle.json");

    tenantsync()
        .current_dir(dir.path())
        .args([
            "export",
            "--root",
            "checkout",
            "--out",
            out.to_str().unwrap(),
            "--pretty",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("exported 2 entries"));

    let bundle: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(bundle["settings"]["friendly_name"], "t");
    assert_eq!(bundle["rules"]["rule1"], "function rule1() {}");
}

#[test]
fn export_to_stdout_emits_bare_json() {
    let dir = checkout_with_config();

    tenantsync()
        .current_dir(dir.path())
        .args(["export", "--root", "checkout"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn export_without_root_fails_for_filesystem_provider() {
    let dir = checkout_with_config();

    tenantsync()
        .current_dir(dir.path())
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--root is required"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_relevant_checkout() {
    let dir = checkout_with_config();

    tenantsync()
        .current_dir(dir.path())
        .args(["check", "snapshot", "--root", "checkout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("touches tenant configuration"));
}

#[test]
fn check_reports_irrelevant_checkout() {
    let dir = checkout_with_config();
    // Wipe the tenant tree; leave unrelated files only.
    std::fs::remove_dir_all(dir.path().join("checkout").join("tenant")).unwrap();
    std::fs::write(dir.path().join("checkout").join("readme.md"), "# app").unwrap();

    tenantsync()
        .current_dir(dir.path())
        .args(["check", "snapshot", "--root", "checkout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no relevant changes"));
}

#[test]
fn missing_config_file_is_a_clear_error() {
    let dir = TempDir::new().unwrap();

    tenantsync()
        .current_dir(dir.path())
        .args(["check", "snapshot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}
