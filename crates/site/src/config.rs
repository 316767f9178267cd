//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CLEARWATER_MONGODB_URI` - MongoDB connection string (falls back to
//!   `MONGODB_URI`)
//!
//! ## Optional
//! - `CLEARWATER_DATABASE` - Database name (default: clearwater)
//! - `CLEARWATER_BCRYPT_COST` - bcrypt cost factor (default: 12, range 4-31)
//! - `ADMIN_EMAIL` - Bootstrap admin email (default: admin@clearwater.example)
//! - `ADMIN_NAME` - Bootstrap admin display name (default: Site Administrator)
//! - `ADMIN_PASSWORD` - Bootstrap admin password; only required by commands
//!   that hash or check a password

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Document store configuration
    pub store: StoreConfig,
    /// Credential hashing configuration
    pub auth: AuthConfig,
    /// Admin bootstrap defaults
    pub bootstrap: BootstrapConfig,
}

/// Document store connection configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string (may embed credentials)
    pub uri: SecretString,
    /// Database name
    pub database: String,
}

/// Credential hashing configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// bcrypt cost factor used when hashing new passwords
    pub bcrypt_cost: u32,
}

/// Admin bootstrap defaults.
///
/// Email and name have defaults; the password must come from the
/// environment and has none.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Admin display name
    pub name: String,
    /// Admin email address
    pub email: String,
    /// Admin password, if `ADMIN_PASSWORD` is set
    password: Option<SecretString>,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let uri = get_store_uri("CLEARWATER_MONGODB_URI")?;
        let database = get_env_or_default("CLEARWATER_DATABASE", "clearwater");

        let bcrypt_cost = parse_bcrypt_cost(&get_env_or_default(
            "CLEARWATER_BCRYPT_COST",
            &bcrypt::DEFAULT_COST.to_string(),
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("CLEARWATER_BCRYPT_COST".to_string(), e))?;

        let bootstrap = BootstrapConfig {
            name: get_env_or_default("ADMIN_NAME", "Site Administrator"),
            email: get_env_or_default("ADMIN_EMAIL", "admin@clearwater.example"),
            password: get_optional_env("ADMIN_PASSWORD").map(SecretString::from),
        };

        Ok(Self {
            store: StoreConfig { uri, database },
            auth: AuthConfig { bcrypt_cost },
            bootstrap,
        })
    }
}

impl BootstrapConfig {
    /// The bootstrap password, required by commands that hash or check one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `ADMIN_PASSWORD` was not set.
    pub fn password(&self) -> Result<&SecretString, ConfigError> {
        self.password
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get store URI with fallback to generic `MONGODB_URI` (set by most hosting
/// providers when a database is attached).
fn get_store_uri(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("MONGODB_URI") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and range-check a bcrypt cost factor.
///
/// bcrypt only accepts costs in 4..=31; anything else is rejected at load
/// time.
fn parse_bcrypt_cost(s: &str) -> Result<u32, String> {
    let cost: u32 = s.parse().map_err(|_| format!("not a number: {s}"))?;
    if !(4..=31).contains(&cost) {
        return Err(format!("cost {cost} outside bcrypt range 4-31"));
    }
    Ok(cost)
}
