use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, SecondsFormat, Utc};

/// Keyset position in the newest-first journal order `(created_at DESC, id DESC)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogCursor {
    pub created_at: DateTime<Utc>,
    pub id: i64,
}

fn invalid() -> DomainError {
    DomainError::Validation("invalid cursor token".into())
}

impl AuditLogCursor {
    pub fn new(created_at: DateTime<Utc>, id: i64) -> Self {
        Self { created_at, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!(
            "{}|{}",
            self.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            self.id
        );
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(token.trim()).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (created_at_s, id_s) = raw.split_once('|').ok_or_else(invalid)?;
        let created_at = DateTime::parse_from_rfc3339(created_at_s)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        let id = id_s.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self::new(created_at, id))
    }

    /// True when an entry at `(created_at, id)` sorts strictly after this cursor.
    pub fn precedes(&self, created_at: DateTime<Utc>, id: i64) -> bool {
        (created_at, id) < (self.created_at, self.id)
    }
}
