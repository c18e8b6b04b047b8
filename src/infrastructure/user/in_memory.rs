//! In-memory user store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::user::{EmergencyContact, UserRecord, UserStore};

#[derive(Debug, Default)]
struct Inner {
    /// Records in insertion order, which is also the fingerprint scan order
    users: Vec<UserRecord>,
    /// Index for username -> position in `users`
    username_index: HashMap<String, usize>,
}

impl Inner {
    fn get_mut(&mut self, username: &str) -> Option<&mut UserRecord> {
        let idx = *self.username_index.get(username)?;
        self.users.get_mut(idx)
    }
}

/// In-memory implementation of UserStore
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial users; later duplicates are ignored
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let mut inner = Inner::default();

        for user in users {
            if inner.username_index.contains_key(user.username()) {
                continue;
            }
            inner
                .username_index
                .insert(user.username().to_string(), inner.users.len());
            inner.users.push(user);
        }

        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .username_index
            .get(username)
            .and_then(|idx| inner.users.get(*idx))
            .cloned())
    }

    async fn find_all_with_fingerprint(&self) -> Result<Vec<UserRecord>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .filter(|u| u.has_fingerprint())
            .cloned()
            .collect())
    }

    async fn insert(&self, user: UserRecord) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        if inner.username_index.contains_key(user.username()) {
            return Err(DomainError::conflict(format!(
                "User '{}' already exists",
                user.username()
            )));
        }

        let idx = inner.users.len();
        inner.username_index.insert(user.username().to_string(), idx);
        inner.users.push(user);

        Ok(())
    }

    async fn upsert_fingerprint(
        &self,
        username: &str,
        fingerprint: &str,
    ) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;

        match inner.get_mut(username) {
            Some(user) => {
                user.set_fingerprint(fingerprint);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_emergency_contact(
        &self,
        username: &str,
        contact: EmergencyContact,
    ) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;

        match inner.get_mut(username) {
            Some(user) => {
                user.set_emergency_contact(contact);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_usernames(&self) -> Result<Vec<String>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().map(|u| u.username().to_string()).collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
