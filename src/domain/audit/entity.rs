use crate::domain::audit::{
    snapshot::Snapshot,
    value_objects::{AuditAction, AuditActor, AuditLogId, EntityRef},
};
use chrono::{DateTime, Utc};

/// A stored journal entry. Never updated or removed once written.
///
/// Snapshot fields hold the stored text verbatim; rows written before
/// validation was enforced may not parse, so reads never reinterpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub created_at: DateTime<Utc>,
    pub actor: AuditActor,
    pub action: AuditAction,
    pub entity: Option<EntityRef>,
    pub origin: Option<String>,
    pub before_snapshot: Option<String>,
    pub after_snapshot: Option<String>,
    pub meta_snapshot: Option<String>,
}

/// Everything the caller controls about an entry. Id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditLog {
    pub actor: AuditActor,
    pub action: AuditAction,
    pub entity: Option<EntityRef>,
    pub origin: Option<String>,
    pub before_snapshot: Option<Snapshot>,
    pub after_snapshot: Option<Snapshot>,
    pub meta_snapshot: Option<Snapshot>,
}

impl NewAuditLog {
    pub fn into_stored(self, id: AuditLogId, created_at: DateTime<Utc>) -> AuditLog {
        AuditLog {
            id,
            created_at,
            actor: self.actor,
            action: self.action,
            entity: self.entity,
            origin: self.origin,
            before_snapshot: self.before_snapshot.map(String::from),
            after_snapshot: self.after_snapshot.map(String::from),
            meta_snapshot: self.meta_snapshot.map(String::from),
        }
    }
}
