// tests/support/builders.rs
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use workshop_core::application::dto::AuthenticatedUser;
use workshop_core::domain::audit::{
    AuditAction, AuditActor, AuditLog, AuditLogId, EntityRef,
};
use workshop_core::domain::user::{DisplayName, EmailAddress, Role, User, UserId, Username};

use super::mocks::fixed_now;

pub fn user(id: i64, username: &str, display_name: &str, email: Option<&str>) -> User {
    User {
        id: UserId::new(id).unwrap(),
        username: Username::new(username).unwrap(),
        display_name: DisplayName::new(display_name).unwrap(),
        email: email.map(|e| EmailAddress::new(e).unwrap()),
        role: Role::Staff,
        is_active: true,
        created_at: fixed_now(),
    }
}

/// ロール既定の権限を持つ認証済みユーザー
pub fn signed_in(id: i64, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(id).unwrap(),
        username: format!("user{id}"),
        display_name: format!("User {id}"),
        role,
        capabilities: role.default_capabilities(),
        session_expires_at: fixed_now() + Duration::hours(8),
    }
}

/// 権限を一切持たない認証済みユーザー
pub fn signed_in_without_capabilities(id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        capabilities: HashSet::new(),
        ..signed_in(id, Role::Staff)
    }
}

pub struct AuditLogBuilder {
    id: i64,
    created_at: DateTime<Utc>,
    actor: AuditActor,
    action: String,
    entity: Option<(String, i64)>,
    before: Option<String>,
    after: Option<String>,
    meta: Option<String>,
}

impl AuditLogBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            created_at: fixed_now(),
            actor: AuditActor::System,
            action: AuditAction::CREATE.into(),
            entity: None,
            before: None,
            after: None,
            meta: None,
        }
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn by(mut self, user_id: i64) -> Self {
        self.actor = AuditActor::User(UserId::new(user_id).unwrap());
        self
    }

    pub fn action(mut self, action: &str) -> Self {
        self.action = action.into();
        self
    }

    pub fn entity(mut self, entity_type: &str, entity_id: i64) -> Self {
        self.entity = Some((entity_type.into(), entity_id));
        self
    }

    pub fn before(mut self, raw: &str) -> Self {
        self.before = Some(raw.into());
        self
    }

    pub fn after(mut self, raw: &str) -> Self {
        self.after = Some(raw.into());
        self
    }

    pub fn meta(mut self, raw: &str) -> Self {
        self.meta = Some(raw.into());
        self
    }

    pub fn build(self) -> AuditLog {
        AuditLog {
            id: AuditLogId::new(self.id).unwrap(),
            created_at: self.created_at,
            actor: self.actor,
            action: AuditAction::new(self.action).unwrap(),
            entity: self
                .entity
                .map(|(t, id)| EntityRef::new(t, id).unwrap()),
            origin: None,
            before_snapshot: self.before,
            after_snapshot: self.after,
            meta_snapshot: self.meta,
        }
    }
}
