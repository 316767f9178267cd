//! Store index creation.
//!
//! # Usage
//!
//! ```bash
//! cw-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CLEARWATER_MONGODB_URI` - MongoDB connection string
//! - `CLEARWATER_DATABASE` - Database name (default: clearwater)

use thiserror::Error;

use clearwater_site::config::{ConfigError, SiteConfig};
use clearwater_site::db::{Store, StoreError};

/// Errors that can occur during migration.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Create the indexes the collections rely on.
///
/// Idempotent; safe to run on every deploy.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or index creation fails.
pub async fn run() -> Result<(), MigrateError> {
    let config = SiteConfig::from_env()?;

    tracing::info!("Connecting to document store...");
    let store = Store::connect(&config.store).await?;

    let result = store.ensure_indexes().await;
    store.shutdown().await;
    result?;

    tracing::info!("Migration complete");
    Ok(())
}
