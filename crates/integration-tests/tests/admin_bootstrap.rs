//! Integration tests for the admin bootstrap and credential diagnostic.
//!
//! These tests require a running MongoDB reachable via
//! `CLEARWATER_MONGODB_URI` (default `mongodb://localhost:27017`). They use
//! the `clearwater_test` database, a distinct email per test, and clean up
//! after themselves.
//!
//! Run with: `cargo test -p clearwater-integration-tests -- --ignored`

use secrecy::SecretString;

use clearwater_core::{Email, UserRole};
use clearwater_site::config::StoreConfig;
use clearwater_site::db::Store;
use clearwater_site::models::NewUser;
use clearwater_site::services::{AdminBootstrap, AuthService, CredentialCheck};

/// Cheapest legal bcrypt cost; keeps the tests fast.
const TEST_COST: u32 = 4;

/// Connect to the test database.
async fn test_store() -> Store {
    let uri = std::env::var("CLEARWATER_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let config = StoreConfig {
        uri: SecretString::from(uri),
        database: "clearwater_test".to_string(),
    };

    let store = Store::connect(&config)
        .await
        .expect("Failed to connect to test store");
    store
        .ensure_indexes()
        .await
        .expect("Failed to ensure indexes");
    store
}

/// Test helper: remove every record with this email.
async fn cleanup(store: &Store, email: &str) {
    let email = Email::parse(email).expect("test email must parse");
    store
        .users()
        .delete_by_email(&email)
        .await
        .expect("Failed to clean up test records");
}

fn secret(password: &str) -> SecretString {
    SecretString::from(password.to_string())
}

// ============================================================================
// Bootstrap Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_admin_bootstrap_is_idempotent() {
    let email = "bootstrap-idempotent@test.clearwater.example";
    let store = test_store().await;
    cleanup(&store, email).await;

    let auth = AuthService::new(&store, TEST_COST);

    let first = auth
        .ensure_admin("Site Administrator", email, &secret("admin123"))
        .await
        .expect("First bootstrap failed");
    assert!(matches!(first, AdminBootstrap::Created(_)));

    let second = auth
        .ensure_admin("Site Administrator", email, &secret("admin123"))
        .await
        .expect("Second bootstrap failed");
    assert!(matches!(second, AdminBootstrap::AlreadyExists(_)));

    let parsed = Email::parse(email).expect("test email must parse");
    let count = store
        .users()
        .count_by_email(&parsed)
        .await
        .expect("Count failed");
    assert_eq!(count, 1, "two bootstrap runs must leave exactly one record");

    cleanup(&store, email).await;
    store.shutdown().await;
}

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_bootstrap_repairs_inactive_record() {
    let email = "bootstrap-repair@test.clearwater.example";
    let store = test_store().await;
    cleanup(&store, email).await;

    // Seed a deactivated, non-admin record for the email.
    let parsed = Email::parse(email).expect("test email must parse");
    store
        .users()
        .insert(&NewUser {
            name: "Former Member".to_string(),
            email: parsed.clone(),
            password_hash: "$2b$04$placeholderplaceholderplaceholderplace".to_string(),
            role: UserRole::Member,
            is_active: false,
        })
        .await
        .expect("Seeding failed");

    let auth = AuthService::new(&store, TEST_COST);
    let outcome = auth
        .ensure_admin("Site Administrator", email, &secret("admin123"))
        .await
        .expect("Bootstrap failed");

    let AdminBootstrap::Promoted(user) = outcome else {
        panic!("expected the existing record to be promoted, got {outcome:?}");
    };
    assert_eq!(user.role, UserRole::Admin);
    assert!(user.is_active);

    let count = store
        .users()
        .count_by_email(&parsed)
        .await
        .expect("Count failed");
    assert_eq!(count, 1);

    cleanup(&store, email).await;
    store.shutdown().await;
}

// ============================================================================
// Credential Diagnostic Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_bootstrap_then_verify_scenario() {
    let email = "verify-scenario@test.clearwater.example";
    let store = test_store().await;
    cleanup(&store, email).await;

    let auth = AuthService::new(&store, TEST_COST);
    auth.ensure_admin("Site Administrator", email, &secret("admin123"))
        .await
        .expect("Bootstrap failed");

    let check = auth
        .verify_credentials(email, &secret("admin123"))
        .await
        .expect("Verification failed");
    assert!(matches!(check, CredentialCheck::Match(_)));

    let check = auth
        .verify_credentials(email, &secret("wrong"))
        .await
        .expect("Verification failed");
    assert!(matches!(check, CredentialCheck::Mismatch(_)));

    let check = auth
        .verify_credentials("nobody@test.clearwater.example", &secret("admin123"))
        .await
        .expect("Verification failed");
    assert!(matches!(check, CredentialCheck::NotFound));

    cleanup(&store, email).await;
    store.shutdown().await;
}

// ============================================================================
// Projection Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_default_reads_omit_password_hash() {
    let email = "projection@test.clearwater.example";
    let store = test_store().await;
    cleanup(&store, email).await;

    let auth = AuthService::new(&store, TEST_COST);
    auth.ensure_admin("Site Administrator", email, &secret("admin123"))
        .await
        .expect("Bootstrap failed");

    let parsed = Email::parse(email).expect("test email must parse");
    let user = store
        .users()
        .find_by_email(&parsed)
        .await
        .expect("Lookup failed")
        .expect("User must exist after bootstrap");

    let json = serde_json::to_string(&user).expect("Serialization failed");
    assert!(
        !json.contains("password"),
        "default read must not carry a password field: {json}"
    );

    // The hash only travels through the explicit opt-in read.
    let (_, hash) = store
        .users()
        .find_with_password_hash(&parsed)
        .await
        .expect("Lookup failed")
        .expect("Stored credential must exist");
    assert!(hash.starts_with("$2b$"), "stored hash must be bcrypt");
    assert_ne!(hash, "admin123");

    cleanup(&store, email).await;
    store.shutdown().await;
}
