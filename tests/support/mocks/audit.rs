// tests/support/mocks/audit.rs
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use workshop_core::domain::{
    audit::{
        AuditAction, AuditLog, AuditLogCursor, AuditLogFilter, AuditLogId, AuditLogRepository,
        JournalActor, NewAuditLog,
    },
    errors::{DomainError, DomainResult},
};

/// メモリ上の監査ログ。クローンは同じ内容を共有する。
#[derive(Clone)]
pub struct InMemoryJournal {
    entries: Arc<Mutex<Vec<AuditLog>>>,
    now: DateTime<Utc>,
}

impl InMemoryJournal {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            now,
        }
    }

    pub fn with_entries(entries: Vec<AuditLog>) -> Self {
        let journal = Self::new(super::fixed_now());
        journal.entries.lock().unwrap().extend(entries);
        journal
    }

    pub fn entries(&self) -> Vec<AuditLog> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// 採番して保存する。タイムスタンプはストア側の固定時刻。
    pub fn store(&self, entry: NewAuditLog) -> AuditLog {
        let mut guard = self.entries.lock().unwrap();
        let id = guard.iter().map(|e| i64::from(e.id)).max().unwrap_or(0) + 1;
        let stored = entry.into_stored(AuditLogId::new(id).unwrap(), self.now);
        guard.push(stored.clone());
        stored
    }
}

fn newest_first(a: &AuditLog, b: &AuditLog) -> std::cmp::Ordering {
    (b.created_at, b.id).cmp(&(a.created_at, a.id))
}

#[async_trait]
impl AuditLogRepository for InMemoryJournal {
    async fn find_by_id(&self, id: AuditLogId) -> DomainResult<Option<AuditLog>> {
        Ok(self.entries().into_iter().find(|e| e.id == id))
    }

    async fn scan(
        &self,
        filter: &AuditLogFilter,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<String>)> {
        let mut items: Vec<AuditLog> = self
            .entries()
            .into_iter()
            .filter(|e| filter.matches(e.actor.user_id(), &e.action, e.created_at))
            .filter(|e| {
                cursor
                    .as_ref()
                    .is_none_or(|c| c.precedes(e.created_at, e.id.into()))
            })
            .collect();
        items.sort_by(newest_first);

        let limit = limit as usize;
        let next = if items.len() > limit {
            items.truncate(limit);
            items
                .last()
                .map(|e| AuditLogCursor::new(e.created_at, e.id.into()).encode())
        } else {
            None
        };
        Ok((items, next))
    }

    async fn distinct_actors(&self) -> DomainResult<Vec<JournalActor>> {
        let mut ids: Vec<_> = self
            .entries()
            .iter()
            .filter_map(|e| e.actor.user_id())
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids
            .into_iter()
            .map(|id| JournalActor {
                id,
                label: format!("user #{id}"),
            })
            .collect())
    }

    async fn distinct_actions(&self) -> DomainResult<Vec<AuditAction>> {
        let mut actions: Vec<AuditAction> =
            self.entries().into_iter().map(|e| e.action).collect();
        actions.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        actions.dedup();
        Ok(actions)
    }
}

/// 一覧は返すがフィルタ候補の取得だけ失敗するリポジトリ
pub struct FailingOptionsJournal(pub InMemoryJournal);

#[async_trait]
impl AuditLogRepository for FailingOptionsJournal {
    async fn find_by_id(&self, id: AuditLogId) -> DomainResult<Option<AuditLog>> {
        self.0.find_by_id(id).await
    }

    async fn scan(
        &self,
        filter: &AuditLogFilter,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<String>)> {
        self.0.scan(filter, limit, cursor).await
    }

    async fn distinct_actors(&self) -> DomainResult<Vec<JournalActor>> {
        Err(DomainError::Persistence("options query failed".into()))
    }

    async fn distinct_actions(&self) -> DomainResult<Vec<AuditAction>> {
        Err(DomainError::Persistence("options query failed".into()))
    }
}
