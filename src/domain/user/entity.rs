//! User record and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Person to reach when the pensioner needs help
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

/// Stored account, keyed by username
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    username: String,
    /// Argon2 hash; `None` for fingerprint-only accounts
    #[serde(default)]
    password_hash: Option<String>,
    /// Device fingerprint, compared by similarity rather than equality
    #[serde(default)]
    fingerprint: Option<String>,
    #[serde(default)]
    emergency_contact: Option<EmergencyContact>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: None,
            fingerprint: None,
            emergency_contact: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    pub fn with_emergency_contact(mut self, contact: EmergencyContact) -> Self {
        self.emergency_contact = Some(contact);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    // Getters

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn emergency_contact(&self) -> Option<&EmergencyContact> {
        self.emergency_contact.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True when a non-empty fingerprint is stored
    pub fn has_fingerprint(&self) -> bool {
        self.fingerprint.as_deref().is_some_and(|f| !f.is_empty())
    }

    // Mutators

    pub fn set_fingerprint(&mut self, fingerprint: impl Into<String>) {
        self.fingerprint = Some(fingerprint.into());
    }

    pub fn set_emergency_contact(&mut self, contact: EmergencyContact) {
        self.emergency_contact = Some(contact);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_bare() {
        let user = UserRecord::new("asha");

        assert_eq!(user.username(), "asha");
        assert!(user.password_hash().is_none());
        assert!(user.fingerprint().is_none());
        assert!(user.emergency_contact().is_none());
        assert!(!user.has_fingerprint());
    }

    #[test]
    fn test_empty_fingerprint_does_not_count() {
        let user = UserRecord::new("asha").with_fingerprint("");
        assert!(!user.has_fingerprint());

        let user = UserRecord::new("asha").with_fingerprint("fp-1");
        assert!(user.has_fingerprint());
    }

    #[test]
    fn test_emergency_contact_update() {
        let mut user = UserRecord::new("ravi");
        user.set_emergency_contact(EmergencyContact {
            name: "Meena".to_string(),
            phone: "+91-98000-00000".to_string(),
            relation: Some("daughter".to_string()),
        });

        assert_eq!(user.emergency_contact().unwrap().name, "Meena");
    }

    #[test]
    fn test_deserialize_sparse_document() {
        let user: UserRecord =
            serde_json::from_str(r#"{"username":"old","fingerprint":null}"#).unwrap();

        assert_eq!(user.username(), "old");
        assert!(user.password_hash().is_none());
        assert!(user.fingerprint().is_none());
    }
}
