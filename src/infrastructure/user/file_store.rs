//! JSON-file user store
//!
//! The whole document is `{username: {password_hash, fingerprint,
//! emergency_contact, created_at}}`. Every operation reads the file, and
//! writes go through a temporary file renamed over the original.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::DomainError;
use crate::domain::user::{EmergencyContact, UserRecord, UserStore};

type Document = BTreeMap<String, StoredUser>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredUser {
    #[serde(default)]
    password_hash: Option<String>,
    #[serde(default)]
    fingerprint: Option<String>,
    #[serde(default)]
    emergency_contact: Option<EmergencyContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl StoredUser {
    fn from_record(record: &UserRecord) -> Self {
        Self {
            password_hash: record.password_hash().map(str::to_string),
            fingerprint: record.fingerprint().map(str::to_string),
            emergency_contact: record.emergency_contact().cloned(),
            created_at: Some(record.created_at()),
        }
    }

    fn into_record(self, username: &str) -> UserRecord {
        let mut record = UserRecord::new(username);

        if let Some(hash) = self.password_hash {
            record = record.with_password_hash(hash);
        }
        if let Some(fingerprint) = self.fingerprint {
            record = record.with_fingerprint(fingerprint);
        }
        if let Some(contact) = self.emergency_contact {
            record = record.with_emergency_contact(contact);
        }
        if let Some(created_at) = self.created_at {
            record = record.with_created_at(created_at);
        }

        record
    }
}

/// User store persisted as a single JSON document.
///
/// Scans visit users in username order.
#[derive(Debug)]
pub struct FileUserStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileUserStore {
    /// Open the store at `path`, creating an empty document if missing
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let store = Self {
            path,
            lock: Mutex::new(()),
        };

        if !tokio::fs::try_exists(&store.path).await.unwrap_or(false) {
            store.write(&Document::new()).await?;
            info!(path = %store.path.display(), "Created empty user file");
        }

        Ok(store)
    }

    async fn read(&self) -> Result<Document, DomainError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        if raw.trim().is_empty() {
            return Ok(Document::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            DomainError::storage(format!("Malformed user file {}: {}", self.path.display(), e))
        })
    }

    async fn write(&self, document: &Document) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| DomainError::storage(format!("Failed to serialize users: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            DomainError::storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), users = document.len(), "User file written");
        Ok(())
    }

    /// Apply `update` to an existing user and persist. Returns whether a user matched.
    async fn modify<F>(&self, username: &str, update: F) -> Result<bool, DomainError>
    where
        F: FnOnce(&mut StoredUser) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;

        let Some(user) = document.get_mut(username) else {
            return Ok(false);
        };
        update(user);

        self.write(&document).await?;
        Ok(true)
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;

        Ok(document
            .remove(username)
            .map(|stored| stored.into_record(username)))
    }

    async fn find_all_with_fingerprint(&self) -> Result<Vec<UserRecord>, DomainError> {
        let _guard = self.lock.lock().await;
        let document = self.read().await?;

        Ok(document
            .into_iter()
            .map(|(username, stored)| stored.into_record(&username))
            .filter(|u| u.has_fingerprint())
            .collect())
    }

    async fn insert(&self, user: UserRecord) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;

        if document.contains_key(user.username()) {
            return Err(DomainError::conflict(format!(
                "User '{}' already exists",
                user.username()
            )));
        }

        document.insert(user.username().to_string(), StoredUser::from_record(&user));
        self.write(&document).await
    }

    async fn upsert_fingerprint(
        &self,
        username: &str,
        fingerprint: &str,
    ) -> Result<bool, DomainError> {
        let fingerprint = fingerprint.to_string();
        self.modify(username, move |user| user.fingerprint = Some(fingerprint))
            .await
    }

    async fn set_emergency_contact(
        &self,
        username: &str,
        contact: EmergencyContact,
    ) -> Result<bool, DomainError> {
        self.modify(username, move |user| user.emergency_contact = Some(contact))
            .await
    }

    async fn list_usernames(&self) -> Result<Vec<String>, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.into_keys().collect())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
