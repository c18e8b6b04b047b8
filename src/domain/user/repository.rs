//! User store trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{EmergencyContact, UserRecord};
use crate::domain::DomainError;

/// Key-value storage of user records keyed by username
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Get a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError>;

    /// All users holding a non-empty fingerprint, in the store's scan order
    async fn find_all_with_fingerprint(&self) -> Result<Vec<UserRecord>, DomainError>;

    /// Create a new user; `Conflict` if the username is taken
    async fn insert(&self, user: UserRecord) -> Result<(), DomainError>;

    /// Set the fingerprint of an existing user. Returns whether a user matched.
    async fn upsert_fingerprint(&self, username: &str, fingerprint: &str)
    -> Result<bool, DomainError>;

    /// Replace the emergency contact of an existing user. Returns whether a user matched.
    async fn set_emergency_contact(
        &self,
        username: &str,
        contact: EmergencyContact,
    ) -> Result<bool, DomainError>;

    /// Usernames of every stored user
    async fn list_usernames(&self) -> Result<Vec<String>, DomainError>;

    /// Short name of the backing storage, reported by `GET /users`
    fn backend_name(&self) -> &'static str;

    /// Check if a username exists
    async fn exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username).await?.is_some())
    }
}
