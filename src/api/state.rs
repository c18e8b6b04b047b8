//! Application state for shared services

use std::sync::Arc;

use crate::domain::llm::{ChatCompletion, ChatMessage};
use crate::domain::user::{EmergencyContact, UserRecord};
use crate::domain::{ClarifyError, ClarifyOutcome, ClarifyRequest, DomainError};
use crate::infrastructure::services::{ChatService, ClarifyPipeline};
use crate::infrastructure::user::{PasswordHasher, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub clarify_service: Arc<dyn ClarifyServiceTrait>,
    pub chat_service: Arc<dyn ChatServiceTrait>,
    pub llm: Arc<dyn ChatCompletion>,
}

/// Trait for user account operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn signup(&self, username: &str, password: Option<&str>)
    -> Result<UserRecord, DomainError>;
    async fn login(&self, username: &str, password: &str)
    -> Result<Option<UserRecord>, DomainError>;
    async fn attach_fingerprint(&self, username: &str, fingerprint: &str)
    -> Result<(), DomainError>;
    async fn register_with_fingerprint(
        &self,
        username: &str,
        fingerprint: &str,
    ) -> Result<UserRecord, DomainError>;
    async fn login_with_fingerprint(&self, fingerprint: &str)
    -> Result<Option<UserRecord>, DomainError>;
    async fn verify_fingerprint(&self, username: &str, fingerprint: &str)
    -> Result<bool, DomainError>;
    async fn update_emergency_contact(
        &self,
        username: &str,
        contact: EmergencyContact,
    ) -> Result<(), DomainError>;
    async fn list_usernames(&self) -> Result<Vec<String>, DomainError>;
    fn storage_backend(&self) -> &'static str;
}

/// Trait for the text clarification pipeline
#[async_trait::async_trait]
pub trait ClarifyServiceTrait: Send + Sync {
    async fn clarify(
        &self,
        request: &ClarifyRequest,
        client_identity: &str,
    ) -> Result<ClarifyOutcome, ClarifyError>;
}

/// Trait for the chat assistant
#[async_trait::async_trait]
pub trait ChatServiceTrait: Send + Sync {
    async fn reply(&self, history: Vec<ChatMessage>) -> String;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<H: PasswordHasher + 'static> UserServiceTrait for UserService<H> {
    async fn signup(
        &self,
        username: &str,
        password: Option<&str>,
    ) -> Result<UserRecord, DomainError> {
        UserService::signup(self, username, password).await
    }

    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        UserService::login(self, username, password).await
    }

    async fn attach_fingerprint(
        &self,
        username: &str,
        fingerprint: &str,
    ) -> Result<(), DomainError> {
        UserService::attach_fingerprint(self, username, fingerprint).await
    }

    async fn register_with_fingerprint(
        &self,
        username: &str,
        fingerprint: &str,
    ) -> Result<UserRecord, DomainError> {
        UserService::register_with_fingerprint(self, username, fingerprint).await
    }

    async fn login_with_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        UserService::login_with_fingerprint(self, fingerprint).await
    }

    async fn verify_fingerprint(
        &self,
        username: &str,
        fingerprint: &str,
    ) -> Result<bool, DomainError> {
        UserService::verify_fingerprint(self, username, fingerprint).await
    }

    async fn update_emergency_contact(
        &self,
        username: &str,
        contact: EmergencyContact,
    ) -> Result<(), DomainError> {
        UserService::update_emergency_contact(self, username, contact).await
    }

    async fn list_usernames(&self) -> Result<Vec<String>, DomainError> {
        UserService::list_usernames(self).await
    }

    fn storage_backend(&self) -> &'static str {
        UserService::storage_backend(self)
    }
}

#[async_trait::async_trait]
impl ClarifyServiceTrait for ClarifyPipeline {
    async fn clarify(
        &self,
        request: &ClarifyRequest,
        client_identity: &str,
    ) -> Result<ClarifyOutcome, ClarifyError> {
        ClarifyPipeline::clarify(self, request, client_identity).await
    }
}

#[async_trait::async_trait]
impl ChatServiceTrait for ChatService {
    async fn reply(&self, history: Vec<ChatMessage>) -> String {
        ChatService::reply(self, history).await
    }
}
