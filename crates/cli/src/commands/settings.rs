//! Site settings commands.
//!
//! # Usage
//!
//! ```bash
//! # Print the settings document as JSON
//! cw-cli settings show
//!
//! # Create or update the contact settings
//! cw-cli settings set \
//!     --phone "+1 555 0100" \
//!     --email hello@example.com \
//!     --address "1 Main St" \
//!     --instagram https://instagram.com/example
//! ```

use thiserror::Error;

use clearwater_core::{Email, EmailError};
use clearwater_site::config::{ConfigError, SiteConfig};
use clearwater_site::db::{Store, StoreError};
use clearwater_site::models::{SettingsInput, SocialLinks};

/// Errors that can occur during settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid contact email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Output serialization failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Arguments for `settings set`.
#[derive(Debug)]
pub struct SetArgs {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub tiktok: Option<String>,
}

/// Print the settings document as JSON.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the lookup fails.
pub async fn show() -> Result<(), SettingsError> {
    let config = SiteConfig::from_env()?;

    tracing::info!("Connecting to document store...");
    let store = Store::connect(&config.store).await?;

    let result = show_inner(&store).await;
    store.shutdown().await;
    result
}

async fn show_inner(store: &Store) -> Result<(), SettingsError> {
    match store.settings().get().await? {
        Some(settings) => {
            let json = serde_json::to_string_pretty(&settings)?;
            #[allow(clippy::print_stdout)]
            {
                println!("{json}");
            }
        }
        None => {
            tracing::warn!("No settings document found; run 'cw-cli settings set' to create one");
        }
    }
    Ok(())
}

/// Create or update the contact settings.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the email is invalid,
/// or the upsert fails.
pub async fn set(args: SetArgs) -> Result<(), SettingsError> {
    let email = Email::parse(&args.email)?;
    let config = SiteConfig::from_env()?;

    let social = SocialLinks {
        facebook: args.facebook,
        instagram: args.instagram,
        tiktok: args.tiktok,
    };
    let input = SettingsInput {
        phone: args.phone,
        email,
        address: args.address,
        social: if social.is_empty() { None } else { Some(social) },
        hours: None,
    };

    tracing::info!("Connecting to document store...");
    let store = Store::connect(&config.store).await?;

    let result = set_inner(&store, &input).await;
    store.shutdown().await;
    result
}

async fn set_inner(store: &Store, input: &SettingsInput) -> Result<(), SettingsError> {
    let settings = store.settings().upsert(input).await?;

    tracing::info!(
        phone = %settings.phone,
        email = %settings.email,
        updated_at = %settings.updated_at,
        "Settings saved"
    );
    Ok(())
}
