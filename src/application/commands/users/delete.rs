use super::{
    UserCommandService,
    capability::ensure_capability,
    service::{USER_ENTITY, audit_meta},
};
use crate::{
    application::{
        commands::audit::RecordAuditCommand,
        dto::{AuthenticatedUser, RequestContext},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditAction, AuditActor},
        user::{UserId, UserWriter},
    },
};

pub struct DeleteUserCommand {
    pub user_id: i64,
}

impl UserCommandService {
    pub async fn delete_user(
        &self,
        actor: &AuthenticatedUser,
        context: &RequestContext,
        command: DeleteUserCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "users", "manage")?;

        let user_id = UserId::new(command.user_id)?;
        if user_id == actor.id {
            return Err(ApplicationError::conflict("cannot delete your own account"));
        }

        let pending = RecordAuditCommand::builder(AuditActor::User(actor.id), AuditAction::DELETE)
            .entity(USER_ENTITY, user_id.into())
            .meta(&audit_meta(context, &[]))
            .origin(context.origin.clone());

        let mut uow = self.uow.begin().await?;
        let existing = uow
            .load_user(user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;
        uow.delete_user(user_id).await?;
        let record = pending.before(&existing.snapshot()).build()?;
        self.recorder.record(uow.as_mut(), record).await?;
        uow.commit().await?;

        Ok(())
    }
}
