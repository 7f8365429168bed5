use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User, UserUpdate},
    value_objects::UserId,
};
use async_trait::async_trait;

/// Read access to accounts outside of any business transaction.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// Missing ids are silently absent from the result.
    async fn find_by_ids(&self, ids: &[UserId]) -> DomainResult<Vec<User>>;
}

/// Account mutations performed inside a unit of work.
#[async_trait]
pub trait UserWriter: Send {
    async fn count_users(&mut self) -> DomainResult<u64>;

    async fn load_user(&mut self, id: UserId) -> DomainResult<Option<User>>;

    async fn insert_user(&mut self, new_user: NewUser) -> DomainResult<User>;

    async fn update_user(&mut self, update: UserUpdate) -> DomainResult<User>;

    async fn delete_user(&mut self, id: UserId) -> DomainResult<()>;
}
