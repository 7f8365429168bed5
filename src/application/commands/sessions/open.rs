use std::sync::Arc;

use chrono::Duration;
use serde_json::json;

use crate::{
    application::{
        commands::audit::{AuditRecorder, RecordAuditCommand},
        dto::{AuthenticatedUser, RequestContext, SessionTokenDto},
        error::{ApplicationError, ApplicationResult},
        ports::{
            session::{NewSession, SessionTokens, SessionWriter},
            time::Clock,
            unit_of_work::UnitOfWorkFactory,
        },
    },
    domain::{
        audit::{AuditAction, AuditActor},
        user::{UserId, UserWriter},
    },
};

pub struct OpenSessionCommand {
    pub user_id: i64,
}

/// Issues bearer sessions for accounts whose credentials were already checked
/// by the sign-in collaborator, and journals each one as a `login`.
pub struct SessionCommandService {
    uow: Arc<dyn UnitOfWorkFactory>,
    recorder: AuditRecorder,
    tokens: Arc<dyn SessionTokens>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionCommandService {
    pub fn new(
        uow: Arc<dyn UnitOfWorkFactory>,
        recorder: AuditRecorder,
        tokens: Arc<dyn SessionTokens>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
    ) -> Self {
        Self {
            uow,
            recorder,
            tokens,
            clock,
            ttl,
        }
    }

    /// Opens a session on behalf of another account. Only account managers
    /// may hand out sessions; the `login` entry is credited to the account
    /// being signed in.
    pub async fn issue_session(
        &self,
        actor: &AuthenticatedUser,
        context: &RequestContext,
        command: OpenSessionCommand,
    ) -> ApplicationResult<SessionTokenDto> {
        if !actor.has_capability("users", "manage") {
            return Err(ApplicationError::forbidden("missing capability users:manage"));
        }
        self.open_session(context, command).await
    }

    pub async fn open_session(
        &self,
        context: &RequestContext,
        command: OpenSessionCommand,
    ) -> ApplicationResult<SessionTokenDto> {
        let user_id = UserId::new(command.user_id)?;
        let now = self.clock.now();
        let expires_at = now + self.ttl;
        let token = self.tokens.generate();

        let record = RecordAuditCommand::builder(AuditActor::User(user_id), AuditAction::LOGIN)
            .meta(&json!({
                "session_expires_at": expires_at.to_rfc3339(),
                "request_id": context.request_id,
            }))
            .origin(context.origin.clone())
            .build()?;

        let mut uow = self.uow.begin().await?;
        let user = uow
            .load_user(user_id)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("unknown account"))?;
        if !user.is_active {
            return Err(ApplicationError::unauthorized("account is deactivated"));
        }
        uow.insert_session(NewSession {
            token_hash: self.tokens.hash(&token),
            user_id,
            created_at: now,
            expires_at,
        })
        .await?;
        self.recorder.record(uow.as_mut(), record).await?;
        uow.commit().await?;

        Ok(SessionTokenDto {
            token,
            user_id: user_id.into(),
            expires_at,
        })
    }
}
