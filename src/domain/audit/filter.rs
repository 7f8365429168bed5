use crate::domain::audit::value_objects::AuditAction;
use crate::domain::user::UserId;
use chrono::{DateTime, NaiveDate, Utc};

/// Conjunctive constraints on a journal scan. `None` means unconstrained.
///
/// Date bounds are inclusive and compare against the UTC calendar date of
/// `created_at`, so `date_to = D` keeps every entry written on day `D`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogFilter {
    pub actor_id: Option<UserId>,
    pub action: Option<AuditAction>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl AuditLogFilter {
    pub fn is_unconstrained(&self) -> bool {
        self.actor_id.is_none()
            && self.action.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    pub fn matches(
        &self,
        actor_id: Option<UserId>,
        action: &AuditAction,
        created_at: DateTime<Utc>,
    ) -> bool {
        let day = created_at.date_naive();
        self.actor_id.is_none_or(|wanted| actor_id == Some(wanted))
            && self.action.as_ref().is_none_or(|wanted| wanted == action)
            && self.date_from.is_none_or(|from| day >= from)
            && self.date_to.is_none_or(|to| day <= to)
    }
}
