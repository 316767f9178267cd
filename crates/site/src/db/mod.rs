//! Document store access for the Clearwater site.
//!
//! # Database: `clearwater`
//!
//! ## Collections
//!
//! - `users` - Site accounts (admin bootstrap target); unique index on email
//! - `settings` - Single contact/hours settings document
//!
//! # Lifecycle
//!
//! The store handle is a scoped resource: maintenance commands acquire it
//! with [`Store::connect`], pass it down explicitly, and release it with
//! [`Store::shutdown`] on every exit path. Nothing here holds a process-wide
//! connection.
//!
//! Indexes are created via:
//! ```bash
//! cargo run -p clearwater-cli -- migrate
//! ```

pub mod settings;
pub mod users;

pub use settings::SettingsRepository;
pub use users::UserRepository;

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::StoreConfig;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or the handshake failed.
    #[error("store connection error: {0}")]
    Connection(#[source] mongodb::error::Error),

    /// A query or write failed after the connection was established.
    #[error("store error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A record that must exist was not found.
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored document does not match the expected shape.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Scoped handle over the site's document store.
///
/// Cheap to borrow from; repositories returned by [`Store::users`] and
/// [`Store::settings`] share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Store {
    db: Database,
}

impl Store {
    /// Connect to the document store and verify the connection with a ping.
    ///
    /// Failures surface here, at acquisition time, rather than on first use.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the URI cannot be parsed or the
    /// server does not answer within the selection timeout.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri.expose_secret())
            .await
            .map_err(StoreError::Connection)?;
        options.server_selection_timeout = Some(Duration::from_secs(10));

        let client = Client::with_options(options).map_err(StoreError::Connection)?;
        let db = client.database(&config.database);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(StoreError::Connection)?;

        tracing::debug!(database = %config.database, "Connected to document store");
        Ok(Self { db })
    }

    /// Repository for user records.
    #[must_use]
    pub fn users(&self) -> UserRepository {
        UserRepository::new(&self.db)
    }

    /// Repository for the settings record.
    #[must_use]
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(&self.db)
    }

    /// Create the indexes the collections rely on.
    ///
    /// Idempotent; creating an index that already exists is a no-op on the
    /// server side.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if index creation fails.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        users::ensure_indexes(&self.db).await
    }

    /// Release the handle, closing the underlying connections.
    pub async fn shutdown(self) {
        self.db.client().clone().shutdown().await;
    }
}
