use crate::domain::audit::{
    cursor::AuditLogCursor,
    entity::{AuditLog, NewAuditLog},
    filter::AuditLogFilter,
    value_objects::{AuditAction, AuditLogId},
};
use crate::domain::errors::DomainResult;
use crate::domain::user::UserId;
use async_trait::async_trait;

/// An actor that appears in the journal, labelled for filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalActor {
    pub id: UserId,
    pub label: String,
}

/// Read side of the journal store.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn find_by_id(&self, id: AuditLogId) -> DomainResult<Option<AuditLog>>;

    /// Newest first, `id` descending on equal timestamps. Returns the page and
    /// the cursor of the next page when more rows exist.
    async fn scan(
        &self,
        filter: &AuditLogFilter,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<String>)>;

    async fn distinct_actors(&self) -> DomainResult<Vec<JournalActor>>;

    async fn distinct_actions(&self) -> DomainResult<Vec<AuditAction>>;
}

/// Write side of the journal store, implemented by whatever owns the caller's transaction.
#[async_trait]
pub trait AuditAppend: Send {
    async fn append_audit(&mut self, entry: NewAuditLog) -> DomainResult<AuditLog>;
}
