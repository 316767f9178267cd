//! Authentication error types.

use thiserror::Error;

use crate::db::StoreError;

/// Errors that can occur during credential operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] clearwater_core::EmailError),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing or comparison failed.
    ///
    /// Surfaced to the caller as-is; a failed comparison is never reported
    /// as a match or a mismatch.
    #[error("password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
