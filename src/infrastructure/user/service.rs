//! User service for password and fingerprint authentication

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::DomainError;
use crate::domain::fingerprint::FingerprintMatcher;
use crate::domain::user::{
    EmergencyContact, UserRecord, UserStore, validate_fingerprint, validate_password,
    validate_username,
};

use super::password::PasswordHasher;

/// User service for authentication and account management
#[derive(Debug)]
pub struct UserService<H: PasswordHasher> {
    store: Arc<dyn UserStore>,
    hasher: Arc<H>,
    matcher: FingerprintMatcher,
}

impl<H: PasswordHasher> UserService<H> {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<H>, matcher: FingerprintMatcher) -> Self {
        Self {
            store,
            hasher,
            matcher,
        }
    }

    pub fn storage_backend(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Create an account; a password is optional for fingerprint-only users
    pub async fn signup(
        &self,
        username: &str,
        password: Option<&str>,
    ) -> Result<UserRecord, DomainError> {
        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;

        let mut user = UserRecord::new(username);
        if let Some(password) = password {
            validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;
            user = user.with_password_hash(self.hasher.hash(password)?);
        }

        self.store.insert(user.clone()).await?;
        info!(username = %username, with_password = password.is_some(), "User created");

        Ok(user)
    }

    /// The user, if the password verifies against the stored hash
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            debug!(username = %username, "Login for unknown user");
            return Ok(None);
        };

        let verified = user
            .password_hash()
            .is_some_and(|hash| self.hasher.verify(password, hash));

        if !verified {
            warn!(username = %username, "Password login rejected");
            return Ok(None);
        }

        info!(username = %username, "Password login succeeded");
        Ok(Some(user))
    }

    /// Attach a fingerprint to an existing user
    pub async fn attach_fingerprint(
        &self,
        username: &str,
        fingerprint: &str,
    ) -> Result<(), DomainError> {
        validate_fingerprint(fingerprint).map_err(|e| DomainError::validation(e.to_string()))?;

        if !self.store.upsert_fingerprint(username, fingerprint).await? {
            return Err(DomainError::not_found(format!("User '{}' not found", username)));
        }

        info!(username = %username, "Fingerprint attached");
        Ok(())
    }

    /// Create a password-less user holding only a fingerprint
    pub async fn register_with_fingerprint(
        &self,
        username: &str,
        fingerprint: &str,
    ) -> Result<UserRecord, DomainError> {
        validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_fingerprint(fingerprint).map_err(|e| DomainError::validation(e.to_string()))?;

        let user = UserRecord::new(username).with_fingerprint(fingerprint);
        self.store.insert(user.clone()).await?;
        info!(username = %username, "User registered with fingerprint");

        Ok(user)
    }

    /// Best-matching user above the similarity threshold. Malformed
    /// candidates never match.
    pub async fn login_with_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        if let Err(e) = validate_fingerprint(fingerprint) {
            warn!(error = %e, "Fingerprint login rejected before matching");
            return Ok(None);
        }

        let users = self.store.find_all_with_fingerprint().await?;
        let candidates = users.len();
        let matcher = self.matcher;
        let candidate = fingerprint.to_string();

        let resolved = tokio::task::spawn_blocking(move || {
            matcher.resolve(&candidate, &users).cloned()
        })
        .await
        .map_err(|e| DomainError::internal(format!("Fingerprint matching task failed: {}", e)))?;

        match resolved {
            Some(user) => {
                info!(
                    username = %user.username(),
                    candidates,
                    "Fingerprint login succeeded"
                );
                Ok(Some(user))
            }
            None => {
                warn!(
                    candidates,
                    threshold = self.matcher.threshold(),
                    "Fingerprint login rejected"
                );
                Ok(None)
            }
        }
    }

    /// Whether `fingerprint` matches the one stored for `username`.
    /// Unknown users never match.
    pub async fn verify_fingerprint(
        &self,
        username: &str,
        fingerprint: &str,
    ) -> Result<bool, DomainError> {
        validate_fingerprint(fingerprint).map_err(|e| DomainError::validation(e.to_string()))?;

        let Some(user) = self.store.find_by_username(username).await? else {
            debug!(username = %username, "Fingerprint verify for unknown user");
            return Ok(false);
        };

        let matcher = self.matcher;
        let candidate = fingerprint.to_string();
        let matched = tokio::task::spawn_blocking(move || matcher.verify(&user, &candidate))
            .await
            .map_err(|e| {
                DomainError::internal(format!("Fingerprint matching task failed: {}", e))
            })?;

        debug!(username = %username, matched, "Fingerprint verified");
        Ok(matched)
    }

    pub async fn update_emergency_contact(
        &self,
        username: &str,
        contact: EmergencyContact,
    ) -> Result<(), DomainError> {
        if contact.name.trim().is_empty() || contact.phone.trim().is_empty() {
            return Err(DomainError::validation(
                "Emergency contact requires a name and a phone number",
            ));
        }

        if !self.store.set_emergency_contact(username, contact).await? {
            return Err(DomainError::not_found(format!("User '{}' not found", username)));
        }

        info!(username = %username, "Emergency contact updated");
        Ok(())
    }

    pub async fn get(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        self.store.find_by_username(username).await
    }

    pub async fn list_usernames(&self) -> Result<Vec<String>, DomainError> {
        self.store.list_usernames().await
    }
}
