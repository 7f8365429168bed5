use super::{AuditQueryService, common};
use crate::{
    application::{
        dto::{AuditDetailDisplayDto, AuditDetailDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::audit::AuditLogId,
};

pub const CANNOT_LOAD_DETAILS: &str = "cannot load audit entry details";

impl AuditQueryService {
    /// Raw before/after/meta text of one entry. Unauthenticated callers get
    /// `Unauthorized`; unknown or non-positive ids get `NotFound`.
    pub async fn audit_log_detail(
        &self,
        requesting: Option<&AuthenticatedUser>,
        id: i64,
    ) -> ApplicationResult<AuditDetailDto> {
        common::ensure_audit_reader(requesting)?;
        let id = AuditLogId::new(id).map_err(|_| ApplicationError::not_found("audit entry not found"))?;

        self.repo
            .find_by_id(id)
            .await?
            .map(AuditDetailDto::from)
            .ok_or_else(|| ApplicationError::not_found("audit entry not found"))
    }

    /// Same entry with each field rendered for display on its own, so one
    /// unreadable field never hides the other two.
    pub async fn audit_log_display(
        &self,
        requesting: Option<&AuthenticatedUser>,
        id: i64,
    ) -> ApplicationResult<AuditDetailDisplayDto> {
        let detail = self.audit_log_detail(requesting, id).await?;
        Ok(AuditDetailDisplayDto::from(&detail))
    }
}
