//! User repository for document store operations.
//!
//! Default reads project the stored password hash away; the only read path
//! that carries it is [`UserRepository::find_with_password_hash`].

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use mongodb::bson::{Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use serde::Deserialize;

use clearwater_core::{Email, UserRole};

use super::StoreError;
use crate::models::user::{NewUser, User};

const COLLECTION: &str = "users";

/// Projection applied to every default read.
fn default_projection() -> Document {
    doc! { "password_hash": 0 }
}

/// Stored shape of a user document.
#[derive(Debug, Deserialize)]
struct UserRow {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    email: String,
    #[serde(default)]
    password_hash: Option<String>,
    role: UserRole,
    is_active: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert into the read model, dropping any hash the row carries.
    fn into_user(self) -> Result<User, StoreError> {
        let email = Email::parse(&self.email).map_err(|e| {
            StoreError::DataCorruption(format!("invalid email in store: {e}"))
        })?;

        Ok(User {
            id: self.id,
            name: self.name,
            email,
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn decode_row(document: Document) -> Result<UserRow, StoreError> {
    bson::from_document(document)
        .map_err(|e| StoreError::DataCorruption(format!("invalid user document: {e}")))
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_err)) if write_err.code == 11000
    )
}

/// Repository for user document operations.
pub struct UserRepository {
    coll: Collection<Document>,
}

impl UserRepository {
    /// Create a new user repository over the given database.
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection(COLLECTION),
        }
    }

    /// Get a user by email address. The stored hash is not fetched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if the stored document is invalid.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        let row = self
            .coll
            .find_one(doc! { "email": email.as_str() })
            .projection(default_projection())
            .await?;

        match row {
            Some(document) => Ok(Some(decode_row(document)?.into_user()?)),
            None => Ok(None),
        }
    }

    /// Get a user together with their stored password hash.
    ///
    /// This is the explicit opt-in read the credential diagnostic uses;
    /// every other read path excludes the hash. Returns `None` if the user
    /// doesn't exist or has no hash stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if the stored document is invalid.
    pub async fn find_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, StoreError> {
        let row = self
            .coll
            .find_one(doc! { "email": email.as_str() })
            .await?;

        let Some(document) = row else {
            return Ok(None);
        };

        let mut row = decode_row(document)?;
        let Some(password_hash) = row.password_hash.take() else {
            return Ok(None);
        };

        Ok(Some((row.into_user()?, password_hash)))
    }

    /// Insert a new user record, stamping both timestamps.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the email already exists.
    /// Returns `StoreError::Database` for other store errors.
    pub async fn insert(&self, new_user: &NewUser) -> Result<User, StoreError> {
        let now = Utc::now();
        let document = doc! {
            "name": &new_user.name,
            "email": new_user.email.as_str(),
            "password_hash": &new_user.password_hash,
            "role": new_user.role.to_string(),
            "is_active": new_user.is_active,
            "created_at": bson::DateTime::from_chrono(now),
            "updated_at": bson::DateTime::from_chrono(now),
        };

        let result = self.coll.insert_one(document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                return StoreError::Conflict("email already exists".to_owned());
            }
            StoreError::Database(e)
        })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::DataCorruption("inserted id is not an ObjectId".to_owned())
        })?;

        Ok(User {
            id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Mark the record with this email as an active admin.
    ///
    /// The stored password hash is left untouched. Returns the updated user,
    /// or `None` if no record has this email.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the update fails.
    /// Returns `StoreError::DataCorruption` if the stored document is invalid.
    pub async fn promote_to_admin(&self, email: &Email) -> Result<Option<User>, StoreError> {
        let update = doc! {
            "$set": {
                "role": UserRole::Admin.to_string(),
                "is_active": true,
                "updated_at": bson::DateTime::from_chrono(Utc::now()),
            }
        };

        let row = self
            .coll
            .find_one_and_update(doc! { "email": email.as_str() }, update)
            .return_document(ReturnDocument::After)
            .projection(default_projection())
            .await?;

        match row {
            Some(document) => Ok(Some(decode_row(document)?.into_user()?)),
            None => Ok(None),
        }
    }

    /// Delete every record with this email.
    ///
    /// Maintenance-script use only; returns the number of records removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the delete fails.
    pub async fn delete_by_email(&self, email: &Email) -> Result<u64, StoreError> {
        let result = self
            .coll
            .delete_many(doc! { "email": email.as_str() })
            .await?;
        Ok(result.deleted_count)
    }

    /// Count records with this email.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the count fails.
    pub async fn count_by_email(&self, email: &Email) -> Result<u64, StoreError> {
        let count = self
            .coll
            .count_documents(doc! { "email": email.as_str() })
            .await?;
        Ok(count)
    }

    /// Count records with the given role.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the count fails.
    pub async fn count_by_role(&self, role: UserRole) -> Result<u64, StoreError> {
        let count = self
            .coll
            .count_documents(doc! { "role": role.to_string() })
            .await?;
        Ok(count)
    }
}

/// Create the unique email index that backs bootstrap idempotency.
pub(crate) async fn ensure_indexes(db: &Database) -> Result<(), StoreError> {
    let index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();

    db.collection::<Document>(COLLECTION)
        .create_index(index)
        .await?;

    tracing::info!(collection = COLLECTION, "Unique email index ensured");
    Ok(())
}
