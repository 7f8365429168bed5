use std::sync::Arc;

use chrono::Duration;

use crate::{
    application::{
        ApplicationResult,
        commands::{audit::AuditRecorder, sessions::SessionCommandService, users::UserCommandService},
        dto::AuthenticatedUser,
        ports::{
            session::{SessionAuthenticator, SessionTokens},
            time::Clock,
            unit_of_work::UnitOfWorkFactory,
        },
        queries::audit::AuditQueryService,
    },
    domain::{audit::AuditLogRepository, user::UserRepository},
};

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub session_commands: Arc<SessionCommandService>,
    pub audit_queries: Arc<AuditQueryService>,
    recorder: AuditRecorder,
    session_authenticator: Arc<dyn SessionAuthenticator>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        unit_of_work: Arc<dyn UnitOfWorkFactory>,
        audit_log_repo: Arc<dyn AuditLogRepository>,
        user_repo: Arc<dyn UserRepository>,
        session_authenticator: Arc<dyn SessionAuthenticator>,
        session_tokens: Arc<dyn SessionTokens>,
        clock: Arc<dyn Clock>,
        session_ttl: Duration,
    ) -> Self {
        let recorder = AuditRecorder::new();

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&unit_of_work),
            recorder,
            Arc::clone(&clock),
        ));
        let session_commands = Arc::new(SessionCommandService::new(
            Arc::clone(&unit_of_work),
            recorder,
            Arc::clone(&session_tokens),
            Arc::clone(&clock),
            session_ttl,
        ));
        let audit_queries = Arc::new(AuditQueryService::new(
            Arc::clone(&audit_log_repo),
            Arc::clone(&user_repo),
        ));

        Self {
            user_commands,
            session_commands,
            audit_queries,
            recorder,
            session_authenticator,
        }
    }

    /// Journal write path for business modules that manage their own unit of work.
    pub fn audit_recorder(&self) -> AuditRecorder {
        self.recorder
    }

    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.session_authenticator.authenticate(token).await
    }
}
