// src/infrastructure/security/session_store.rs
use crate::application::{
    ApplicationResult,
    dto::AuthenticatedUser,
    error::ApplicationError,
    ports::{ClockPort, SessionTokensPort},
};
use crate::domain::user::{Role, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::application::ports::session::SessionAuthenticator;

#[derive(Debug, FromRow)]
struct SessionRow {
    user_id: i64,
    username: String,
    display_name: String,
    role: String,
    is_active: bool,
    expires_at: DateTime<Utc>,
}

/// Resolves bearer tokens against the `sessions` table.
pub struct SqliteSessionStore {
    pool: SqlitePool,
    tokens: Arc<SessionTokensPort>,
    clock: Arc<ClockPort>,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool, tokens: Arc<SessionTokensPort>, clock: Arc<ClockPort>) -> Self {
        Self {
            pool,
            tokens,
            clock,
        }
    }
}

#[async_trait]
impl SessionAuthenticator for SqliteSessionStore {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApplicationError::unauthorized("missing session token"));
        }

        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT s.user_id AS user_id, u.username AS username, u.display_name AS display_name,
                   u.role AS role, u.is_active AS is_active, s.expires_at AS expires_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = ?
            "#,
        )
        .bind(self.tokens.hash(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "session lookup failed");
            ApplicationError::infrastructure("session lookup failed")
        })?
        .ok_or_else(|| ApplicationError::unauthorized("invalid session"))?;

        if row.expires_at <= self.clock.now() {
            tracing::debug!(user_id = row.user_id, "session expired");
            return Err(ApplicationError::unauthorized("session expired"));
        }
        if !row.is_active {
            return Err(ApplicationError::unauthorized("account is deactivated"));
        }

        let role = row.role.parse::<Role>()?;
        Ok(AuthenticatedUser {
            id: UserId::new(row.user_id)?,
            username: row.username,
            display_name: row.display_name,
            capabilities: role.default_capabilities(),
            role,
            session_expires_at: row.expires_at,
        })
    }
}
