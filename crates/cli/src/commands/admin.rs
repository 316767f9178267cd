//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Ensure an active admin account exists (idempotent)
//! cw-cli admin ensure -e admin@example.com -n "Admin Name"
//!
//! # Check a plaintext password against the stored hash
//! cw-cli admin verify -e admin@example.com
//!
//! # Delete an account
//! cw-cli admin remove -e old-admin@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `CLEARWATER_MONGODB_URI` - MongoDB connection string
//! - `ADMIN_EMAIL` / `ADMIN_NAME` - Bootstrap defaults for `-e` / `-n`
//! - `ADMIN_PASSWORD` - Password used by `ensure` and as the `verify`
//!   default

use secrecy::SecretString;
use thiserror::Error;

use clearwater_core::{Email, EmailError, UserRole};
use clearwater_site::config::{ConfigError, SiteConfig};
use clearwater_site::db::{Store, StoreError};
use clearwater_site::services::{AdminBootstrap, AuthError, AuthService, CredentialCheck};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Credential operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No account exists with this email.
    #[error("No account found with email: {0}")]
    NotFound(String),
}

/// Ensure exactly one active admin account exists.
///
/// Email and name fall back to the `ADMIN_EMAIL` / `ADMIN_NAME` defaults;
/// the password always comes from `ADMIN_PASSWORD`.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the store is
/// unreachable, or the bootstrap itself fails.
pub async fn ensure(email: Option<&str>, name: Option<&str>) -> Result<(), AdminError> {
    let config = SiteConfig::from_env()?;
    let email = email.unwrap_or(&config.bootstrap.email).to_owned();
    let name = name.unwrap_or(&config.bootstrap.name).to_owned();
    let password = config.bootstrap.password()?.clone();

    tracing::info!("Connecting to document store...");
    let store = Store::connect(&config.store).await?;

    let result = ensure_inner(&store, &config, &name, &email, &password).await;
    store.shutdown().await;
    result
}

async fn ensure_inner(
    store: &Store,
    config: &SiteConfig,
    name: &str,
    email: &str,
    password: &SecretString,
) -> Result<(), AdminError> {
    let auth = AuthService::new(store, config.auth.bcrypt_cost);

    tracing::info!(%email, "Ensuring active admin account");
    match auth.ensure_admin(name, email, password).await? {
        AdminBootstrap::Created(user) => {
            tracing::info!(email = %user.email, id = %user.id, "Admin account created");
        }
        AdminBootstrap::AlreadyExists(user) => {
            tracing::info!(email = %user.email, "Admin account already present; nothing to do");
        }
        AdminBootstrap::Promoted(user) => {
            tracing::info!(email = %user.email, "Existing account promoted to active admin");
        }
    }

    let admins = store.users().count_by_role(UserRole::Admin).await?;
    tracing::info!(admins, "Bootstrap complete");
    Ok(())
}

/// Check a plaintext password against the stored hash for an account.
///
/// Operational diagnostic: the outcome is reported, and a mismatch is a
/// completed diagnostic, not a command failure. An unknown email is an
/// error.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the store is
/// unreachable, no account carries a credential for the email, or the
/// comparison itself fails.
pub async fn verify(email: Option<&str>, password: Option<String>) -> Result<(), AdminError> {
    let config = SiteConfig::from_env()?;
    let email = email.unwrap_or(&config.bootstrap.email).to_owned();
    let password = match password {
        Some(p) => SecretString::from(p),
        None => config.bootstrap.password()?.clone(),
    };

    tracing::info!("Connecting to document store...");
    let store = Store::connect(&config.store).await?;

    let result = verify_inner(&store, &config, &email, &password).await;
    store.shutdown().await;
    result
}

async fn verify_inner(
    store: &Store,
    config: &SiteConfig,
    email: &str,
    password: &SecretString,
) -> Result<(), AdminError> {
    let auth = AuthService::new(store, config.auth.bcrypt_cost);

    match auth.verify_credentials(email, password).await? {
        CredentialCheck::Match(user) => {
            tracing::info!(email = %user.email, "Password matches the stored hash");
        }
        CredentialCheck::Mismatch(user) => {
            tracing::warn!(email = %user.email, "Password does NOT match the stored hash");
        }
        CredentialCheck::NotFound => {
            return Err(AdminError::NotFound(email.to_owned()));
        }
    }
    Ok(())
}

/// Delete the account with the given email.
///
/// # Errors
///
/// Returns `AdminError::NotFound` if no account has this email.
pub async fn remove(email: &str) -> Result<(), AdminError> {
    let email = Email::parse(email)?;
    let config = SiteConfig::from_env()?;

    tracing::info!("Connecting to document store...");
    let store = Store::connect(&config.store).await?;

    let result = remove_inner(&store, &email).await;
    store.shutdown().await;
    result
}

async fn remove_inner(store: &Store, email: &Email) -> Result<(), AdminError> {
    let deleted = store.users().delete_by_email(email).await?;
    if deleted == 0 {
        return Err(AdminError::NotFound(email.to_string()));
    }

    tracing::info!(%email, deleted, "Account removed");
    Ok(())
}
