use crate::domain::user::{Capability, Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use super::serde_time;

/// Signed-in account resolved from a session token. Passed explicitly to every
/// command and query that needs to know who is asking.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
    pub session_expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn has_capability(&self, resource: &str, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches(resource, action))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionTokenDto {
    pub token: String,
    pub user_id: i64,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
}

/// Request-scoped facts recorded alongside an audited action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub origin: Option<String>,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(origin: Option<String>, request_id: Option<String>) -> Self {
        Self { origin, request_id }
    }
}
