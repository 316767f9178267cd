//! Settings repository.
//!
//! The site has a single settings document; reads fetch it, writes upsert it.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use mongodb::bson::{Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::Deserialize;

use clearwater_core::Email;

use super::StoreError;
use crate::models::settings::{BusinessHours, Settings, SettingsInput, SocialLinks};

const COLLECTION: &str = "settings";

/// Stored shape of the settings document.
#[derive(Debug, Deserialize)]
struct SettingsRow {
    #[serde(rename = "_id")]
    id: ObjectId,
    phone: String,
    email: String,
    address: String,
    #[serde(default)]
    social: Option<SocialLinks>,
    #[serde(default)]
    hours: Option<BusinessHours>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

impl SettingsRow {
    fn into_settings(self) -> Result<Settings, StoreError> {
        let email = Email::parse(&self.email).map_err(|e| {
            StoreError::DataCorruption(format!("invalid email in store: {e}"))
        })?;

        Ok(Settings {
            id: self.id,
            phone: self.phone,
            email,
            address: self.address,
            social: self.social,
            hours: self.hours,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn decode_row(document: Document) -> Result<SettingsRow, StoreError> {
    bson::from_document(document)
        .map_err(|e| StoreError::DataCorruption(format!("invalid settings document: {e}")))
}

/// Repository for the settings document.
pub struct SettingsRepository {
    coll: Collection<Document>,
}

impl SettingsRepository {
    /// Create a new settings repository over the given database.
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection(COLLECTION),
        }
    }

    /// Fetch the settings document, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if the stored document is invalid.
    pub async fn get(&self) -> Result<Option<Settings>, StoreError> {
        let row = self.coll.find_one(doc! {}).await?;

        match row {
            Some(document) => Ok(Some(decode_row(document)?.into_settings()?)),
            None => Ok(None),
        }
    }

    /// Create or update the settings document.
    ///
    /// Contact fields are always written and `updated_at` is stamped;
    /// `created_at` is only set when the document is first created. The
    /// optional sections are written only when the input provides them.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the write fails.
    /// Returns `StoreError::DataCorruption` if the resulting document is
    /// invalid.
    pub async fn upsert(&self, input: &SettingsInput) -> Result<Settings, StoreError> {
        let now = bson::DateTime::from_chrono(Utc::now());

        let mut set = doc! {
            "phone": &input.phone,
            "email": input.email.as_str(),
            "address": &input.address,
            "updated_at": now,
        };
        if let Some(social) = &input.social {
            set.insert("social", encode("social links", social)?);
        }
        if let Some(hours) = &input.hours {
            set.insert("hours", encode("business hours", hours)?);
        }

        let update = doc! {
            "$set": set,
            "$setOnInsert": { "created_at": now },
        };

        let row = self
            .coll
            .find_one_and_update(doc! {}, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(StoreError::NotFound)?;

        decode_row(row)?.into_settings()
    }
}

fn encode<T: serde::Serialize>(what: &str, value: &T) -> Result<bson::Bson, StoreError> {
    bson::to_bson(value)
        .map_err(|e| StoreError::DataCorruption(format!("failed to encode {what}: {e}")))
}
