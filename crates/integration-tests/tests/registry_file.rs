//! Integration tests for the file-backed credential registry.
//!
//! Each test gets its own temp directory, so the registry file starts absent.

use bharatcart_admin::db::{CredentialRepository, JsonFileRegistry, RepositoryError};
use bharatcart_admin::models::SessionKind;
use bharatcart_admin::services::{AuthError, AuthService};

// =============================================================================
// Registration and login across handles
// =============================================================================

#[tokio::test]
async fn test_registration_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bharatcart_sql_registry_v1.json");

    let auth = AuthService::new(JsonFileRegistry::new(&path));
    let handle = auth
        .register("Arjun", "Sharma Co", "pw1")
        .await
        .expect("register");
    assert_eq!(handle.as_str(), "sharmaco");
    drop(auth);

    // A new service on the same file sees the account.
    let auth = AuthService::new(JsonFileRegistry::new(&path));
    let outcome = auth.authenticate("sharmaco", "pw1").await.expect("login");
    assert_eq!(outcome.kind, SessionKind::Registered);
    assert_eq!(outcome.profile.owner_name, "Arjun");
    assert_eq!(outcome.profile.business_name, "Sharma Co");

    let err = auth.authenticate("sharmaco", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_duplicate_handle_leaves_file_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("registry.json");
    let auth = AuthService::new(JsonFileRegistry::new(&path));

    auth.register("Arjun", "Sharma Co", "pw1").await.expect("register");
    let before = std::fs::read_to_string(&path).expect("read");

    let err = auth
        .register("Priya", "SharmaCo", "other")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateHandle(_)));
    assert_eq!(std::fs::read_to_string(&path).expect("read"), before);
}

#[tokio::test]
async fn test_stored_shape_is_plain_array() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("registry.json");
    let auth = AuthService::new(JsonFileRegistry::new(&path));

    auth.register("Arjun", "Sharma Co", "pw1").await.expect("register");
    auth.register("Priya", "Patel Textiles", "pw2").await.expect("register");

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(
        stored,
        serde_json::json!([
            { "ownerName": "Arjun", "businessName": "Sharma Co",
              "emailPrefix": "sharmaco", "password": "pw1" },
            { "ownerName": "Priya", "businessName": "Patel Textiles",
              "emailPrefix": "pateltextiles", "password": "pw2" }
        ])
    );
}

#[tokio::test]
async fn test_hand_written_file_is_read() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("registry.json");
    std::fs::write(
        &path,
        r#"[{"ownerName":"Ishan","businessName":"Verma Spices","emailPrefix":"vermaspices","password":"masala"}]"#,
    )
    .expect("write");

    let auth = AuthService::new(JsonFileRegistry::new(&path));
    let outcome = auth.authenticate(" VermaSpices ", "masala").await.expect("login");
    assert_eq!(outcome.profile.owner_name, "Ishan");
}

#[tokio::test]
async fn test_demo_login_needs_no_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.json");
    let auth = AuthService::new(JsonFileRegistry::new(&path));

    let outcome = auth.authenticate("demo", "demo@123").await.expect("login");
    assert_eq!(outcome.kind, SessionKind::Demo);
    assert_eq!(outcome.profile.business_name, "Sharma Handicrafts");
    assert!(!path.exists());
}

#[tokio::test]
async fn test_corrupt_file_surfaces_as_repository_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("registry.json");
    std::fs::write(&path, "[{").expect("write");

    let registry = JsonFileRegistry::new(&path);
    assert!(matches!(
        registry.list_all().await,
        Err(RepositoryError::DataCorruption(_))
    ));

    let auth = AuthService::new(registry);
    let err = auth.register("Arjun", "Sharma Co", "pw1").await.unwrap_err();
    assert!(matches!(err, AuthError::Repository(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_registrations_store_one_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("registry.json");
    let auth = AuthService::new(JsonFileRegistry::new(&path));

    let (first, second) = tokio::join!(
        auth.register("Arjun", "Sharma Co", "pw1"),
        auth.register("Priya", "sharma co", "pw2"),
    );
    assert!(first.is_ok() != second.is_ok());

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(stored.as_array().map(Vec::len), Some(1));
}
