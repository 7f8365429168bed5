use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use std::fmt;

const MAX_ACTION_LEN: usize = 64;
const MAX_ENTITY_TYPE_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuditLogId(i64);

impl AuditLogId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("audit log id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<AuditLogId> for i64 {
    fn from(value: AuditLogId) -> Self {
        value.0
    }
}

impl fmt::Display for AuditLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-defined action token such as `create` or `login`.
///
/// The vocabulary is open: any short, whitespace-free token is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuditAction(String);

impl AuditAction {
    pub const CREATE: &'static str = "create";
    pub const UPDATE: &'static str = "update";
    pub const DELETE: &'static str = "delete";
    pub const LOGIN: &'static str = "login";

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("audit action cannot be empty".into()));
        }
        if trimmed.len() > MAX_ACTION_LEN {
            return Err(DomainError::Validation(format!(
                "audit action must be at most {MAX_ACTION_LEN} bytes"
            )));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation(
                "audit action must be a single token".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Rehydrates an action read back from storage. The token rules only
    /// apply on write; stored text is shown as-is.
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<AuditAction> for String {
    fn from(value: AuditAction) -> Self {
        value.0
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The business object an entry is about. Type and id always travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    entity_type: String,
    entity_id: i64,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<String>, entity_id: i64) -> DomainResult<Self> {
        let entity_type = entity_type.into();
        let trimmed = entity_type.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("entity type cannot be empty".into()));
        }
        if trimmed.len() > MAX_ENTITY_TYPE_LEN {
            return Err(DomainError::Validation(format!(
                "entity type must be at most {MAX_ENTITY_TYPE_LEN} bytes"
            )));
        }
        Ok(Self {
            entity_type: trimmed.to_string(),
            entity_id,
        })
    }

    /// Rebuilds a reference from two nullable columns; a half-populated pair is rejected.
    pub fn from_parts(entity_type: Option<String>, entity_id: Option<i64>) -> DomainResult<Option<Self>> {
        match (entity_type, entity_id) {
            (Some(entity_type), Some(entity_id)) => Self::new(entity_type, entity_id).map(Some),
            (None, None) => Ok(None),
            _ => Err(DomainError::Validation(
                "entity type and entity id must be both present or both absent".into(),
            )),
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_id(&self) -> i64 {
        self.entity_id
    }
}

/// Who an entry is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditActor {
    User(UserId),
    /// Actions with no signed-in user, e.g. the installer.
    System,
}

impl AuditActor {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            AuditActor::User(id) => Some(*id),
            AuditActor::System => None,
        }
    }
}

impl From<Option<UserId>> for AuditActor {
    fn from(value: Option<UserId>) -> Self {
        value.map_or(AuditActor::System, AuditActor::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_token_is_trimmed_and_single_word() {
        assert_eq!(AuditAction::new("  update ").unwrap().as_str(), "update");
        assert!(AuditAction::new("").is_err());
        assert!(AuditAction::new("   ").is_err());
        assert!(AuditAction::new("bulk update").is_err());
        assert!(AuditAction::new("stock.adjust").is_ok());
    }

    #[test]
    fn stored_action_is_kept_verbatim() {
        assert_eq!(AuditAction::from_stored("bulk update".into()).as_str(), "bulk update");
    }

    #[test]
    fn entity_ref_requires_both_parts() {
        assert!(EntityRef::from_parts(Some("material".into()), Some(3)).unwrap().is_some());
        assert!(EntityRef::from_parts(None, None).unwrap().is_none());
        assert!(EntityRef::from_parts(Some("material".into()), None).is_err());
        assert!(EntityRef::from_parts(None, Some(3)).is_err());
    }

    #[test]
    fn actor_without_user_is_system() {
        assert_eq!(AuditActor::from(None), AuditActor::System);
        let id = UserId::new(7).unwrap();
        assert_eq!(AuditActor::from(Some(id)).user_id(), Some(id));
    }
}
