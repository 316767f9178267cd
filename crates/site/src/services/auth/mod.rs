//! Credential service.
//!
//! Hashing lives here and nowhere else: repositories and models only ever
//! carry hashes, and the record save path never hashes. This is the single
//! place a plaintext password is turned into a stored credential.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};

use clearwater_core::{Email, UserRole};

use crate::db::{Store, StoreError, UserRepository};
use crate::models::user::{NewUser, User};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Outcome of the idempotent admin bootstrap.
#[derive(Debug)]
pub enum AdminBootstrap {
    /// No record existed; an active admin was created.
    Created(User),
    /// An active admin already existed; nothing was changed.
    AlreadyExists(User),
    /// A record existed but was inactive or not an admin; its flags were
    /// repaired in place, password untouched.
    Promoted(User),
}

/// Outcome of the credential diagnostic.
#[derive(Debug)]
pub enum CredentialCheck {
    /// The supplied password matches the stored hash.
    Match(User),
    /// The supplied password does not match the stored hash.
    Mismatch(User),
    /// No record with this email carries a credential.
    NotFound,
}

/// Credential service.
///
/// Handles admin bootstrap and the operational credential diagnostic.
pub struct AuthService {
    users: UserRepository,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Create a new credential service over a scoped store handle.
    #[must_use]
    pub fn new(store: &Store, bcrypt_cost: u32) -> Self {
        Self {
            users: store.users(),
            bcrypt_cost,
        }
    }

    /// Ensure exactly one active admin record exists for this email.
    ///
    /// Idempotent: running it twice yields exactly one admin record.
    /// The password is only hashed (and validated) when a record is
    /// actually created; an existing record's stored hash is never
    /// rewritten.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if a record must be created and the
    /// password doesn't meet requirements.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub async fn ensure_admin(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<AdminBootstrap, AuthError> {
        let email = Email::parse(email)?;

        match self.users.find_by_email(&email).await? {
            Some(user) if user.role == UserRole::Admin && user.is_active => {
                tracing::info!(email = %user.email, "Active admin already exists");
                Ok(AdminBootstrap::AlreadyExists(user))
            }
            Some(user) => {
                tracing::info!(
                    email = %user.email,
                    role = %user.role,
                    is_active = user.is_active,
                    "Existing record is not an active admin; repairing"
                );
                let promoted = self
                    .users
                    .promote_to_admin(&email)
                    .await?
                    .ok_or(StoreError::NotFound)?;
                Ok(AdminBootstrap::Promoted(promoted))
            }
            None => {
                let plaintext = password.expose_secret();
                validate_password(plaintext)?;
                let password_hash = hash_password(plaintext, self.bcrypt_cost)?;

                let user = self
                    .users
                    .insert(&NewUser {
                        name: name.to_owned(),
                        email,
                        password_hash,
                        role: UserRole::Admin,
                        is_active: true,
                    })
                    .await?;

                tracing::info!(email = %user.email, id = %user.id, "Admin record created");
                Ok(AdminBootstrap::Created(user))
            }
        }
    }

    /// Check a plaintext password against the stored hash for this email.
    ///
    /// Operational diagnostic only; this is not a request-time login path.
    /// The lookup explicitly requests the normally-hidden hash field.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::PasswordHash` if the comparison itself fails;
    /// a failed comparison is never reported as a match or a mismatch.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<CredentialCheck, AuthError> {
        let email = Email::parse(email)?;

        let Some((user, stored_hash)) = self.users.find_with_password_hash(&email).await? else {
            return Ok(CredentialCheck::NotFound);
        };

        if verify_password(password.expose_secret(), &stored_hash)? {
            Ok(CredentialCheck::Match(user))
        } else {
            Ok(CredentialCheck::Mismatch(user))
        }
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password with bcrypt at the given cost.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Verify a password against a stored bcrypt hash.
///
/// A comparison failure (for example a corrupt stored hash) is an error,
/// never a mismatch.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the hash cannot be parsed or the
/// comparison fails.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // Cheapest legal cost; keeps the hashing tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hash = hash_password("admin123", TEST_COST).unwrap();
        assert_ne!(hash, "admin123");
    }

    #[test]
    fn test_hash_then_verify_matches() {
        let hash = hash_password("admin123", TEST_COST).unwrap();
        assert!(verify_password("admin123", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_does_not_match() {
        let hash = hash_password("admin123", TEST_COST).unwrap();
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        // Salted: two hashes of the same input must differ.
        let first = hash_password("admin123", TEST_COST).unwrap();
        let second = hash_password("admin123", TEST_COST).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_cost_is_encoded_in_hash() {
        let hash = hash_password("admin123", TEST_COST).unwrap();
        assert!(hash.starts_with("$2b$04$"));
    }

    #[test]
    fn test_corrupt_hash_is_an_error_not_a_mismatch() {
        let result = verify_password("admin123", "not-a-bcrypt-hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_password_rejects_short() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("admin123").is_ok());
    }
}
