use crate::application::{ApplicationResult, dto::AuthenticatedUser};
use crate::domain::{errors::DomainResult, user::UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub token_hash: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    /// Resolve a bearer token to the signed-in account, rejecting unknown,
    /// expired and deactivated sessions as unauthorized.
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser>;
}

#[async_trait]
pub trait SessionWriter: Send {
    async fn insert_session(&mut self, session: NewSession) -> DomainResult<()>;
}

pub trait SessionTokens: Send + Sync {
    fn generate(&self) -> String;
    fn hash(&self, token: &str) -> String;
}
