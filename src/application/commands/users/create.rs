use super::{
    UserCommandService,
    capability::ensure_capability,
    service::{USER_ENTITY, audit_meta},
};
use crate::{
    application::{
        commands::audit::RecordAuditCommand,
        dto::{AuthenticatedUser, RequestContext, UserDto},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditAction, AuditActor},
        user::{DisplayName, EmailAddress, NewUser, Role, UserWriter, Username},
    },
};

pub struct CreateUserCommand {
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl UserCommandService {
    pub async fn create_user(
        &self,
        actor: &AuthenticatedUser,
        context: &RequestContext,
        command: CreateUserCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "users", "manage")?;

        let new_user = NewUser {
            username: Username::new(command.username)?,
            display_name: DisplayName::new(command.display_name)?,
            email: command.email.map(EmailAddress::new).transpose()?,
            role: command.role.as_deref().map(str::parse::<Role>).transpose()?.unwrap_or_default(),
            is_active: true,
            created_at: self.clock.now(),
        };

        let pending = RecordAuditCommand::builder(AuditActor::User(actor.id), AuditAction::CREATE)
            .meta(&audit_meta(context, &[]))
            .origin(context.origin.clone());

        let mut uow = self.uow.begin().await?;
        let created = uow.insert_user(new_user).await?;
        let record = pending
            .entity(USER_ENTITY, created.id.into())
            .after(&created.snapshot())
            .build()?;
        self.recorder.record(uow.as_mut(), record).await?;
        uow.commit().await?;

        Ok(created.into())
    }
}
