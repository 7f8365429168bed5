use super::{UserCommandService, service::USER_ENTITY};
use crate::{
    application::{commands::audit::RecordAuditCommand, dto::UserDto, error::ApplicationResult},
    domain::{
        audit::{AuditAction, AuditActor},
        user::{DisplayName, EmailAddress, NewUser, Role, UserWriter, Username},
    },
};
use serde_json::json;
use tracing::info;

pub struct InstallAdminCommand {
    pub username: String,
    pub email: Option<String>,
}

impl UserCommandService {
    /// Creates the first administrator on an empty install, credited to the
    /// system actor. Returns `None` when accounts already exist.
    pub async fn install_admin(&self, command: InstallAdminCommand) -> ApplicationResult<Option<UserDto>> {
        let username = Username::new(command.username)?;
        let new_user = NewUser {
            display_name: DisplayName::new(username.as_str())?,
            username,
            email: command.email.map(EmailAddress::new).transpose()?,
            role: Role::Admin,
            is_active: true,
            created_at: self.clock.now(),
        };
        let pending = RecordAuditCommand::builder(AuditActor::System, AuditAction::CREATE)
            .meta(&json!({ "source": "installer" }));

        let mut uow = self.uow.begin().await?;
        if uow.count_users().await? > 0 {
            return Ok(None);
        }
        let created = uow.insert_user(new_user).await?;
        let record = pending
            .entity(USER_ENTITY, created.id.into())
            .after(&created.snapshot())
            .build()?;
        self.recorder.record(uow.as_mut(), record).await?;
        uow.commit().await?;

        info!(user_id = %created.id, "installed initial administrator");
        Ok(Some(created.into()))
    }
}
