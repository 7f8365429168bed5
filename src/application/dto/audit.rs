use crate::domain::audit::{AuditAction, AuditLog, JournalActor, SnapshotDisplay, display_field};
use crate::domain::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

pub const SYSTEM_ACTOR_LABEL: &str = "system";
pub const UNKNOWN_ACTOR_LABEL: &str = "unknown user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    User,
    System,
    Unknown,
}

/// Actor as shown next to an entry, resolved when the journal is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActorView {
    pub kind: ActorKind,
    pub id: Option<i64>,
    pub display_name: String,
    pub contact: Option<String>,
}

impl ActorView {
    pub fn system() -> Self {
        Self {
            kind: ActorKind::System,
            id: None,
            display_name: SYSTEM_ACTOR_LABEL.into(),
            contact: None,
        }
    }

    pub fn unknown(id: i64) -> Self {
        Self {
            kind: ActorKind::Unknown,
            id: Some(id),
            display_name: UNKNOWN_ACTOR_LABEL.into(),
            contact: None,
        }
    }

    pub fn from_user(user: &User) -> Self {
        Self {
            kind: ActorKind::User,
            id: Some(user.id.into()),
            display_name: user.display_name.as_str().to_string(),
            contact: user
                .email
                .as_ref()
                .map(|email| email.as_str().to_string())
                .or_else(|| Some(user.username.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogView {
    pub id: i64,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    pub actor: ActorView,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub origin: Option<String>,
}

impl AuditLogView {
    pub fn new(log: AuditLog, actor: ActorView) -> Self {
        let (entity_type, entity_id) = match log.entity {
            Some(entity) => (
                Some(entity.entity_type().to_string()),
                Some(entity.entity_id()),
            ),
            None => (None, None),
        };
        Self {
            id: log.id.into(),
            created_at: log.created_at,
            actor,
            action: log.action.into(),
            entity_type,
            entity_id,
            origin: log.origin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActorOptionDto {
    pub id: i64,
    pub label: String,
}

impl From<JournalActor> for ActorOptionDto {
    fn from(actor: JournalActor) -> Self {
        Self {
            id: actor.id.into(),
            label: actor.label,
        }
    }
}

/// Values that currently occur in the journal, for building filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuditFilterOptions {
    pub actors: Vec<ActorOptionDto>,
    pub actions: Vec<String>,
}

impl AuditFilterOptions {
    pub fn new(actors: Vec<JournalActor>, actions: Vec<AuditAction>) -> Self {
        Self {
            actors: actors.into_iter().map(Into::into).collect(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogPage {
    pub items: Vec<AuditLogView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub filters: AuditFilterOptions,
}

/// Stored snapshot text, untouched. Each field is rendered independently by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuditDetailDto {
    pub id: i64,
    pub before: Option<String>,
    pub after: Option<String>,
    pub meta: Option<String>,
}

impl From<AuditLog> for AuditDetailDto {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id.into(),
            before: log.before_snapshot,
            after: log.after_snapshot,
            meta: log.meta_snapshot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SnapshotDisplayDto {
    /// One of `pretty`, `raw` or `absent`.
    pub kind: String,
    pub text: String,
}

impl From<SnapshotDisplay> for SnapshotDisplayDto {
    fn from(display: SnapshotDisplay) -> Self {
        Self {
            kind: display.kind().to_string(),
            text: display.text().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuditDetailDisplayDto {
    pub id: i64,
    pub before: SnapshotDisplayDto,
    pub after: SnapshotDisplayDto,
    pub meta: SnapshotDisplayDto,
}

impl From<&AuditDetailDto> for AuditDetailDisplayDto {
    fn from(detail: &AuditDetailDto) -> Self {
        Self {
            id: detail.id,
            before: display_field(detail.before.as_deref()).into(),
            after: display_field(detail.after.as_deref()).into(),
            meta: display_field(detail.meta.as_deref()).into(),
        }
    }
}
