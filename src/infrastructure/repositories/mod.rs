// src/infrastructure/repositories/mod.rs
mod error;
mod sqlite_audit_log;
mod sqlite_user;
mod unit_of_work;

pub use error::map_sqlx;
pub use sqlite_audit_log::SqliteAuditLogRepository;
pub use sqlite_user::SqliteUserRepository;
pub use unit_of_work::{SqliteUnitOfWork, SqliteUnitOfWorkFactory};
