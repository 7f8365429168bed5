use super::{map_sqlx, sqlite_audit_log, sqlite_user};
use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::{
        session::{NewSession, SessionWriter},
        unit_of_work::{UnitOfWork, UnitOfWorkFactory},
    },
};
use crate::domain::{
    audit::{AuditAppend, AuditLog, NewAuditLog},
    errors::DomainResult,
    user::{NewUser, User, UserId, UserUpdate, UserWriter},
};
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// A SQLite transaction shared by a business write and the journal entry
/// describing it. Dropping it without `commit` rolls both back.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl AuditAppend for SqliteUnitOfWork {
    async fn append_audit(&mut self, entry: NewAuditLog) -> DomainResult<AuditLog> {
        sqlite_audit_log::insert_audit_log(&mut self.tx, entry).await
    }
}

#[async_trait]
impl UserWriter for SqliteUnitOfWork {
    async fn count_users(&mut self) -> DomainResult<u64> {
        sqlite_user::count_users(&mut self.tx).await
    }

    async fn load_user(&mut self, id: UserId) -> DomainResult<Option<User>> {
        sqlite_user::load_user(&mut self.tx, id).await
    }

    async fn insert_user(&mut self, new_user: NewUser) -> DomainResult<User> {
        sqlite_user::insert_user(&mut self.tx, new_user).await
    }

    async fn update_user(&mut self, update: UserUpdate) -> DomainResult<User> {
        sqlite_user::update_user(&mut self.tx, update).await
    }

    async fn delete_user(&mut self, id: UserId) -> DomainResult<()> {
        sqlite_user::delete_user(&mut self.tx, id).await
    }
}

#[async_trait]
impl SessionWriter for SqliteUnitOfWork {
    async fn insert_session(&mut self, session: NewSession) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO sessions (token_hash, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.token_hash)
        .bind(i64::from(session.user_id))
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.tx.commit().await.map_err(map_sqlx)
    }
}

#[derive(Clone)]
pub struct SqliteUnitOfWorkFactory {
    pool: SqlitePool,
}

impl SqliteUnitOfWorkFactory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWorkFactory for SqliteUnitOfWorkFactory {
    /// Opens with `BEGIN IMMEDIATE`: the write lock is held from the first read.
    async fn begin(&self) -> ApplicationResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await.map_err(|err| {
            tracing::error!(error = %err, "failed to open transaction");
            ApplicationError::infrastructure("database unavailable")
        })?;
        Ok(Box::new(SqliteUnitOfWork { tx }))
    }
}
