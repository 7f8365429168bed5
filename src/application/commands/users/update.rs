use super::{
    UserCommandService,
    capability::ensure_capability,
    service::{USER_ENTITY, audit_meta},
};
use crate::{
    application::{
        commands::audit::RecordAuditCommand,
        dto::{AuthenticatedUser, RequestContext, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditAction, AuditActor},
        user::{DisplayName, EmailAddress, Role, UserId, UserUpdate, UserWriter},
    },
};

pub struct UpdateUserCommand {
    pub user_id: i64,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UserCommandService {
    pub async fn update_user(
        &self,
        actor: &AuthenticatedUser,
        context: &RequestContext,
        command: UpdateUserCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "users", "manage")?;

        let user_id = UserId::new(command.user_id)?;
        let update = UserUpdate {
            id: user_id,
            display_name: command.display_name.map(DisplayName::new).transpose()?,
            email: command.email.map(EmailAddress::new).transpose()?,
            role: command.role.as_deref().map(str::parse::<Role>).transpose()?,
            is_active: command.is_active,
        };

        if update.is_empty() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }
        if user_id == actor.id && update.is_active == Some(false) {
            return Err(ApplicationError::conflict("cannot deactivate your own account"));
        }

        let pending = RecordAuditCommand::builder(AuditActor::User(actor.id), AuditAction::UPDATE)
            .entity(USER_ENTITY, user_id.into())
            .meta(&audit_meta(context, &update.changed_fields()))
            .origin(context.origin.clone());

        let mut uow = self.uow.begin().await?;
        let before = uow
            .load_user(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;
        let after = uow.update_user(update).await?;
        let record = pending
            .before(&before.snapshot())
            .after(&after.snapshot())
            .build()?;
        self.recorder.record(uow.as_mut(), record).await?;
        uow.commit().await?;

        Ok(after.into())
    }
}
