// tests/support/mocks/user_repo.rs
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use workshop_core::domain::{
    errors::{DomainError, DomainResult},
    user::{User, UserId, UserRepository},
};

/// メモリ上のユーザーストア。クローンは同じ内容を共有する。
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    pub(crate) inner: Arc<Mutex<BTreeMap<i64, User>>>,
}

impl InMemoryUsers {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.inner.lock().unwrap();
            for user in users {
                guard.insert(user.id.into(), user);
            }
        }
        store
    }

    pub fn snapshot(&self) -> BTreeMap<i64, User> {
        self.inner.lock().unwrap().clone()
    }

    pub fn replace(&self, users: BTreeMap<i64, User>) {
        *self.inner.lock().unwrap() = users;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.inner.lock().unwrap().get(&i64::from(id)).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> DomainResult<Vec<User>> {
        let guard = self.inner.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| guard.get(&i64::from(*id)).cloned())
            .collect())
    }
}

/// 常に失敗するユーザー参照
pub struct FailingUserRepo;

#[async_trait]
impl UserRepository for FailingUserRepo {
    async fn find_by_id(&self, _id: UserId) -> DomainResult<Option<User>> {
        Err(DomainError::Persistence("user store offline".into()))
    }

    async fn find_by_ids(&self, _ids: &[UserId]) -> DomainResult<Vec<User>> {
        Err(DomainError::Persistence("user store offline".into()))
    }
}
