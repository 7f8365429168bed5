use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        audit::{AuditAction, AuditActor, AuditAppend, AuditLogId, EntityRef, NewAuditLog, Snapshot},
        errors::{DomainError, DomainResult},
    },
};
use serde::Serialize;
use tracing::{error, info};

/// A fully validated journal entry waiting to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAuditCommand {
    entry: NewAuditLog,
}

impl RecordAuditCommand {
    pub fn builder(actor: AuditActor, action: impl Into<String>) -> RecordAuditCommandBuilder {
        RecordAuditCommandBuilder {
            actor,
            action: action.into(),
            entity: None,
            origin: None,
            before: None,
            after: None,
            meta: None,
            encode_error: None,
        }
    }

    pub fn entry(&self) -> &NewAuditLog {
        &self.entry
    }

    pub fn into_entry(self) -> NewAuditLog {
        self.entry
    }
}

/// Snapshots are encoded as soon as they are attached, so an unrepresentable
/// value surfaces from `build` before any transaction is opened.
#[derive(Debug)]
pub struct RecordAuditCommandBuilder {
    actor: AuditActor,
    action: String,
    entity: Option<(String, i64)>,
    origin: Option<String>,
    before: Option<Snapshot>,
    after: Option<Snapshot>,
    meta: Option<Snapshot>,
    encode_error: Option<DomainError>,
}

impl RecordAuditCommandBuilder {
    pub fn entity(mut self, entity_type: impl Into<String>, entity_id: i64) -> Self {
        self.entity = Some((entity_type.into(), entity_id));
        self
    }

    pub fn origin(mut self, origin: Option<String>) -> Self {
        self.origin = origin
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        self
    }

    pub fn before<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.before = self.encode(value);
        self
    }

    pub fn after<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.after = self.encode(value);
        self
    }

    pub fn meta<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.meta = self.encode(value);
        self
    }

    fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Option<Snapshot> {
        match Snapshot::encode(value) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                self.encode_error.get_or_insert(err);
                None
            }
        }
    }

    pub fn build(self) -> DomainResult<RecordAuditCommand> {
        if let Some(err) = self.encode_error {
            return Err(err);
        }
        let action = AuditAction::new(self.action)?;
        let entity = self
            .entity
            .map(|(entity_type, entity_id)| EntityRef::new(entity_type, entity_id))
            .transpose()?;

        Ok(RecordAuditCommand {
            entry: NewAuditLog {
                actor: self.actor,
                action,
                entity,
                origin: self.origin,
                before_snapshot: self.before,
                after_snapshot: self.after,
                meta_snapshot: self.meta,
            },
        })
    }
}

/// Write path of the activity journal.
///
/// The entry goes into whatever sink the caller hands over, normally the unit
/// of work carrying the business mutation, so both commit or neither does.
/// A failed append is returned to the caller and never retried.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuditRecorder;

impl AuditRecorder {
    pub fn new() -> Self {
        Self
    }

    pub async fn record<S>(&self, sink: &mut S, command: RecordAuditCommand) -> ApplicationResult<AuditLogId>
    where
        S: AuditAppend + ?Sized,
    {
        let entry = command.into_entry();
        let action = entry.action.clone();

        match sink.append_audit(entry).await {
            Ok(stored) => {
                info!(
                    audit_id = %stored.id,
                    action = %stored.action,
                    entity_type = stored.entity.as_ref().map(|e| e.entity_type()),
                    entity_id = stored.entity.as_ref().map(|e| e.entity_id()),
                    "audit entry recorded"
                );
                Ok(stored.id)
            }
            Err(err) => {
                error!(error = %err, action = %action, "failed to record audit entry");
                Err(ApplicationError::from(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;
    use serde_json::json;
    use std::collections::HashMap;

    fn actor() -> AuditActor {
        AuditActor::User(UserId::new(1).unwrap())
    }

    #[test]
    fn build_encodes_all_snapshots() {
        let command = RecordAuditCommand::builder(actor(), "update")
            .entity("material", 12)
            .before(&json!({"stock": 4}))
            .after(&json!({"stock": 9}))
            .meta(&json!({"changed": ["stock"]}))
            .origin(Some(" 10.0.0.8 ".into()))
            .build()
            .unwrap();

        let entry = command.entry();
        assert_eq!(entry.action.as_str(), "update");
        assert_eq!(entry.entity.as_ref().unwrap().entity_id(), 12);
        assert_eq!(entry.before_snapshot.as_ref().unwrap().as_str(), r#"{"stock":4}"#);
        assert_eq!(entry.after_snapshot.as_ref().unwrap().as_str(), r#"{"stock":9}"#);
        assert_eq!(entry.origin.as_deref(), Some("10.0.0.8"));
    }

    #[test]
    fn login_has_no_state_snapshots() {
        let command = RecordAuditCommand::builder(actor(), "login")
            .meta(&json!({"method": "session"}))
            .build()
            .unwrap();
        let entry = command.entry();
        assert!(entry.before_snapshot.is_none());
        assert!(entry.after_snapshot.is_none());
        assert!(entry.meta_snapshot.is_some());
        assert!(entry.entity.is_none());
    }

    #[test]
    fn empty_action_is_rejected() {
        let err = RecordAuditCommand::builder(AuditActor::System, "  ").build().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn unrepresentable_snapshot_fails_the_build() {
        let mut bins: HashMap<(u8, u8), u32> = HashMap::new();
        bins.insert((1, 1), 30);
        let err = RecordAuditCommand::builder(actor(), "update")
            .before(&bins)
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::Serialization(_)));
    }

    #[test]
    fn blank_origin_is_dropped() {
        let command = RecordAuditCommand::builder(AuditActor::System, "create")
            .origin(Some("   ".into()))
            .build()
            .unwrap();
        assert!(command.entry().origin.is_none());
    }
}
