// src/domain/user/entity.rs
use crate::domain::user::value_objects::{DisplayName, EmailAddress, Role, UserId, Username};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub display_name: DisplayName,
    pub email: Option<EmailAddress>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id.into(),
            username: self.username.to_string(),
            display_name: self.display_name.as_str().to_string(),
            email: self.email.as_ref().map(|e| e.as_str().to_string()),
            role: self.role,
            is_active: self.is_active,
        }
    }
}

/// State of an account as captured in the activity journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSnapshot {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: Role,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub display_name: DisplayName,
    pub email: Option<EmailAddress>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: UserId,
    pub display_name: Option<DisplayName>,
    pub email: Option<EmailAddress>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            display_name: None,
            email: None,
            role: None,
            is_active: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }

    /// Names of the fields this update touches, in a stable order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.display_name.is_some() {
            fields.push("display_name");
        }
        if self.email.is_some() {
            fields.push("email");
        }
        if self.role.is_some() {
            fields.push("role");
        }
        if self.is_active.is_some() {
            fields.push("is_active");
        }
        fields
    }
}
