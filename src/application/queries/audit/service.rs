use std::sync::Arc;

use crate::domain::{audit::AuditLogRepository, user::UserRepository};

/// Read path of the activity journal: filtered listing and per-entry detail.
pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditLogRepository>,
    pub(super) users: Arc<dyn UserRepository>,
}

impl AuditQueryService {
    pub fn new(repo: Arc<dyn AuditLogRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { repo, users }
    }
}
