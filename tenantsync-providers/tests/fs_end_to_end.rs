//! End-to-end materialization over a local checkout.

use serde_json::json;
use tempfile::TempDir;
use tenantsync_core::types::{ChangesetId, ChangesetRef};
use tenantsync_core::{ProviderType, SyncConfig};
use tenantsync_engine::{ChangeDetector, TreeMaterializer};
use tenantsync_providers::FsProvider;

// ---------------------------------------------------------------------------
// Fixture checkout
// ---------------------------------------------------------------------------

fn config() -> SyncConfig {
    SyncConfig {
        provider_type: ProviderType::Filesystem,
        instance: String::new(),
        collection: String::new(),
        repository: String::new(),
        branch: String::new(),
        token: None,
        project_path: "tenant".into(),
    }
}

fn checkout() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let tenant = dir.path().join("tenant");
    std::fs::create_dir_all(tenant.join("rules")).unwrap();
    std::fs::create_dir_all(tenant.join("pages")).unwrap();
    std::fs::create_dir_all(tenant.join("database-connections").join("users-db")).unwrap();
    std::fs::create_dir_all(tenant.join("database-connections").join("empty-db")).unwrap();
    std::fs::create_dir_all(dir.path().join("docs")).unwrap();

    std::fs::write(
        tenant.join("tenant.json"),
        r#"{ "friendly_name": "Test tenant" }"#,
    )
    .unwrap();
    std::fs::write(tenant.join("readme.md"), "# not config").unwrap();
    std::fs::write(tenant.join("rules").join("rule1.js"), "function rule1() {}").unwrap();
    std::fs::write(tenant.join("pages").join("login.html"), "<html>login</html>").unwrap();
    std::fs::write(
        tenant
            .join("database-connections")
            .join("users-db")
            .join("login.js"),
        "function login() {}",
    )
    .unwrap();
    std::fs::write(dir.path().join("docs").join("setup.md"), "# setup").unwrap();
    dir
}

fn changeset() -> ChangesetRef {
    ChangesetRef {
        project: "local".into(),
        changeset_id: ChangesetId::from("snapshot"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn checkout_materializes_to_expected_bundle() {
    let dir = checkout();
    let provider = FsProvider::new(dir.path());
    let bundle = TreeMaterializer::new(config())
        .materialize(&provider, &changeset())
        .expect("materialize");

    assert_eq!(
        serde_json::to_value(&bundle).expect("serialize"),
        json!({
            "settings": { "friendly_name": "Test tenant" },
            "rules": { "rule1": "function rule1() {}" },
            "pages": { "login": "<html>login</html>" },
            "databases": {
                "users-db": { "login": "function login() {}" },
                "empty-db": {}
            }
        })
    );
}

#[test]
fn detector_sees_tenant_config_in_snapshot() {
    let dir = checkout();
    let provider = FsProvider::new(dir.path());
    let detector = ChangeDetector::new(&config());
    assert!(detector
        .has_changes(&provider, &ChangesetId::from("snapshot"))
        .expect("has_changes"));
}

#[test]
fn detector_ignores_checkout_without_tenant_config() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src").join("main.rs"), "fn main() {}").unwrap();
    std::fs::write(dir.path().join("readme.md"), "# app").unwrap();

    let provider = FsProvider::new(dir.path());
    let detector = ChangeDetector::new(&config());
    assert!(!detector
        .has_changes(&provider, &ChangesetId::from("snapshot"))
        .expect("has_changes"));
}

#[test]
fn materializing_an_empty_tenant_fails_on_missing_root() {
    let dir = TempDir::new().expect("tempdir");
    let provider = FsProvider::new(dir.path());
    let result = TreeMaterializer::new(config()).materialize(&provider, &changeset());
    assert!(result.is_err(), "no tenant/ folder in the checkout");
}
