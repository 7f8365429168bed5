// tests/support/mocks/unit_of_work.rs
use std::collections::BTreeMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use workshop_core::application::{
    ApplicationResult,
    ports::{
        session::{NewSession, SessionWriter},
        unit_of_work::{UnitOfWork, UnitOfWorkFactory},
    },
};
use workshop_core::domain::{
    audit::{AuditAppend, AuditLog, NewAuditLog},
    errors::{DomainError, DomainResult},
    user::{NewUser, User, UserId, UserUpdate, UserWriter},
};

use super::{InMemoryJournal, InMemoryUsers};

/// 書き込みをステージングし、commit 時にだけ反映するユニットオブワーク。
#[derive(Clone)]
pub struct InMemoryUnitOfWorkFactory {
    pub users: InMemoryUsers,
    pub journal: InMemoryJournal,
    pub sessions: Arc<Mutex<Vec<NewSession>>>,
    fail_audit: Arc<AtomicBool>,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new(users: InMemoryUsers, journal: InMemoryJournal) -> Self {
        Self {
            users,
            journal,
            sessions: Arc::new(Mutex::new(Vec::new())),
            fail_audit: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 以降の監査ログ追記をすべて失敗させる
    pub fn fail_audit_writes(&self) {
        self.fail_audit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    async fn begin(&self) -> ApplicationResult<Box<dyn UnitOfWork>> {
        Ok(Box::new(InMemoryUnitOfWork {
            factory: self.clone(),
            users: self.users.snapshot(),
            audit: Vec::new(),
            sessions: Vec::new(),
        }))
    }
}

pub struct InMemoryUnitOfWork {
    factory: InMemoryUnitOfWorkFactory,
    users: BTreeMap<i64, User>,
    audit: Vec<NewAuditLog>,
    sessions: Vec<NewSession>,
}

#[async_trait]
impl AuditAppend for InMemoryUnitOfWork {
    async fn append_audit(&mut self, entry: NewAuditLog) -> DomainResult<AuditLog> {
        if self.factory.fail_audit.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("audit table unavailable".into()));
        }
        self.audit.push(entry.clone());
        let id = workshop_core::domain::audit::AuditLogId::new(
            (self.factory.journal.len() + self.audit.len()) as i64,
        )?;
        Ok(entry.into_stored(id, super::fixed_now()))
    }
}

#[async_trait]
impl UserWriter for InMemoryUnitOfWork {
    async fn count_users(&mut self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }

    async fn load_user(&mut self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.users.get(&i64::from(id)).cloned())
    }

    async fn insert_user(&mut self, new_user: NewUser) -> DomainResult<User> {
        if self
            .users
            .values()
            .any(|u| u.username.as_str() == new_user.username.as_str())
        {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let id = self.users.keys().max().copied().unwrap_or(0) + 1;
        let user = User {
            id: UserId::new(id)?,
            username: new_user.username,
            display_name: new_user.display_name,
            email: new_user.email,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_user(&mut self, update: UserUpdate) -> DomainResult<User> {
        let user = self
            .users
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        if let Some(display_name) = update.display_name {
            user.display_name = display_name;
        }
        if let Some(email) = update.email {
            user.email = Some(email);
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }
        Ok(user.clone())
    }

    async fn delete_user(&mut self, id: UserId) -> DomainResult<()> {
        self.users
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("user not found".into()))
    }
}

#[async_trait]
impl SessionWriter for InMemoryUnitOfWork {
    async fn insert_session(&mut self, session: NewSession) -> DomainResult<()> {
        self.sessions.push(session);
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let this = *self;
        this.factory.users.replace(this.users);
        for entry in this.audit {
            this.factory.journal.store(entry);
        }
        this.factory.sessions.lock().unwrap().extend(this.sessions);
        Ok(())
    }
}
