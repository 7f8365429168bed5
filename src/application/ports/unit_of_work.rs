use crate::application::{ApplicationResult, ports::session::SessionWriter};
use crate::domain::{audit::AuditAppend, errors::DomainResult, user::UserWriter};
use async_trait::async_trait;

/// One atomic business operation. Writes made through it, audit entries
/// included, become visible together on `commit`; dropping it rolls them back.
#[async_trait]
pub trait UnitOfWork: AuditAppend + UserWriter + SessionWriter + Send {
    async fn commit(self: Box<Self>) -> DomainResult<()>;
}

#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    async fn begin(&self) -> ApplicationResult<Box<dyn UnitOfWork>>;
}
