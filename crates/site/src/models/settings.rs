//! Site settings domain types.
//!
//! A single settings document holds the contact details the public pages
//! render. Plain CRUD, one document per site.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clearwater_core::Email;

/// Social media links shown in the site footer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
}

impl SocialLinks {
    /// True when no link is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.facebook.is_none() && self.instagram.is_none() && self.tiktok.is_none()
    }
}

/// Business hours, one free-form string per weekday.
///
/// Strings are displayed verbatim ("9:00 - 17:00", "Closed"); a missing day
/// renders as unspecified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<String>,
}

/// The site settings record (read model).
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Document ID.
    pub id: ObjectId,
    /// Contact phone number.
    pub phone: String,
    /// Contact email address.
    pub email: Email,
    /// Street address.
    pub address: String,
    /// Social media links, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialLinks>,
    /// Business hours, if specified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<BusinessHours>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or updating the settings record.
///
/// Contact fields are always written; `social` and `hours` are only written
/// when provided, leaving any stored value untouched otherwise.
#[derive(Debug, Clone)]
pub struct SettingsInput {
    pub phone: String,
    pub email: Email,
    pub address: String,
    pub social: Option<SocialLinks>,
    pub hours: Option<BusinessHours>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_social_links_is_empty() {
        assert!(SocialLinks::default().is_empty());
        let links = SocialLinks {
            instagram: Some("https://instagram.com/clearwater".to_string()),
            ..SocialLinks::default()
        };
        assert!(!links.is_empty());
    }

    #[test]
    fn test_business_hours_skips_unset_days() {
        let hours = BusinessHours {
            monday: Some("9:00 - 17:00".to_string()),
            ..BusinessHours::default()
        };
        let json = serde_json::to_string(&hours).unwrap();
        assert_eq!(json, "{\"monday\":\"9:00 - 17:00\"}");
    }

    #[test]
    fn test_business_hours_deserializes_partial_documents() {
        let hours: BusinessHours =
            serde_json::from_str("{\"saturday\":\"10:00 - 14:00\"}").unwrap();
        assert_eq!(hours.saturday.as_deref(), Some("10:00 - 14:00"));
        assert!(hours.monday.is_none());
    }
}
