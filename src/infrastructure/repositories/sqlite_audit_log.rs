use super::map_sqlx;
use crate::domain::audit::{
    AuditAction, AuditActor, AuditAppend, AuditLog, AuditLogCursor, AuditLogFilter, AuditLogId,
    AuditLogRepository, EntityRef, JournalActor, NewAuditLog,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Same shape as the column default `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')`,
/// so keyset comparisons on the text column stay exact.
fn storage_timestamp(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[derive(Clone)]
pub struct SqliteAuditLogRepository {
    pool: SqlitePool,
}

impl SqliteAuditLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    created_at: DateTime<Utc>,
    actor_id: Option<i64>,
    action: String,
    entity_type: Option<String>,
    entity_id: Option<i64>,
    origin: Option<String>,
    before_snapshot: Option<String>,
    after_snapshot: Option<String>,
    meta_snapshot: Option<String>,
}

impl AuditLogRow {
    /// Read-side mapping. Historical rows may predate the write-time rules, so
    /// a bad actor id or half-filled entity pair degrades instead of failing
    /// the whole page. Only a non-positive row id drops the row.
    fn into_entry(self) -> Option<AuditLog> {
        let id = match AuditLogId::new(self.id) {
            Ok(id) => id,
            Err(err) => {
                warn!(row_id = self.id, error = %err, "skipping unreadable audit row");
                return None;
            }
        };
        let actor = match self.actor_id.map(UserId::new).transpose() {
            Ok(actor) => actor.into(),
            Err(err) => {
                warn!(audit_log_id = self.id, error = %err, "audit row has an invalid actor id");
                AuditActor::System
            }
        };
        let entity = EntityRef::from_parts(self.entity_type, self.entity_id).unwrap_or_else(|err| {
            warn!(audit_log_id = self.id, error = %err, "audit row has an invalid entity reference");
            None
        });

        Some(AuditLog {
            id,
            created_at: self.created_at,
            actor,
            action: AuditAction::from_stored(self.action),
            entity,
            origin: self.origin,
            before_snapshot: self.before_snapshot,
            after_snapshot: self.after_snapshot,
            meta_snapshot: self.meta_snapshot,
        })
    }
}

#[derive(Debug, FromRow)]
struct JournalActorRow {
    id: i64,
    display_name: Option<String>,
}

pub(super) async fn insert_audit_log(
    conn: &mut SqliteConnection,
    entry: NewAuditLog,
) -> DomainResult<AuditLog> {
    let row = sqlx::query_as::<_, AuditLogRow>(
        r#"
        INSERT INTO audit_logs (actor_id, action, entity_type, entity_id, origin, before_snapshot, after_snapshot, meta_snapshot)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, created_at, actor_id, action, entity_type, entity_id, origin, before_snapshot, after_snapshot, meta_snapshot
        "#,
    )
    .bind(entry.actor.user_id().map(i64::from))
    .bind(entry.action.as_str())
    .bind(entry.entity.as_ref().map(|e| e.entity_type()))
    .bind(entry.entity.as_ref().map(|e| e.entity_id()))
    .bind(entry.origin.as_deref())
    .bind(entry.before_snapshot.as_ref().map(|s| s.as_str()))
    .bind(entry.after_snapshot.as_ref().map(|s| s.as_str()))
    .bind(entry.meta_snapshot.as_ref().map(|s| s.as_str()))
    .fetch_one(conn)
    .await
    .map_err(map_sqlx)?;

    row.into_entry()
        .ok_or_else(|| DomainError::Persistence("inserted audit row could not be read back".into()))
}

/// Business code holding a raw transaction can journal into it directly.
#[async_trait]
impl<'c> AuditAppend for Transaction<'c, Sqlite> {
    async fn append_audit(&mut self, entry: NewAuditLog) -> DomainResult<AuditLog> {
        insert_audit_log(self, entry).await
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &AuditLogFilter) {
    if let Some(actor_id) = filter.actor_id {
        builder.push(" AND actor_id = ");
        builder.push_bind(i64::from(actor_id));
    }
    if let Some(action) = &filter.action {
        builder.push(" AND action = ");
        builder.push_bind(action.as_str().to_string());
    }
    if let Some(from) = filter.date_from {
        builder.push(" AND date(created_at) >= ");
        builder.push_bind(from.format(DATE_FORMAT).to_string());
    }
    if let Some(to) = filter.date_to {
        builder.push(" AND date(created_at) <= ");
        builder.push_bind(to.format(DATE_FORMAT).to_string());
    }
}

#[async_trait]
impl AuditLogRepository for SqliteAuditLogRepository {
    async fn find_by_id(&self, id: AuditLogId) -> DomainResult<Option<AuditLog>> {
        let row = sqlx::query_as::<_, AuditLogRow>(
            "SELECT id, created_at, actor_id, action, entity_type, entity_id, origin, before_snapshot, after_snapshot, meta_snapshot FROM audit_logs WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(row.and_then(AuditLogRow::into_entry))
    }

    async fn scan(
        &self,
        filter: &AuditLogFilter,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<String>)> {
        let limit = limit.max(1);
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, created_at, actor_id, action, entity_type, entity_id, origin, before_snapshot, after_snapshot, meta_snapshot FROM audit_logs WHERE 1 = 1",
        );
        push_filter(&mut builder, filter);

        if let Some(cursor) = &cursor {
            let at = storage_timestamp(cursor.created_at);
            builder.push(" AND (created_at < ");
            builder.push_bind(at.clone());
            builder.push(" OR (created_at = ");
            builder.push_bind(at);
            builder.push(" AND id < ");
            builder.push_bind(cursor.id);
            builder.push("))");
        }

        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(limit) + 1);

        let mut rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        // Cursor comes from the raw rows; skipped rows still advance paging.
        let next_cursor = if rows.len() > limit as usize {
            rows.truncate(limit as usize);
            rows.last()
                .map(|last| AuditLogCursor::new(last.created_at, last.id).encode())
        } else {
            None
        };
        let items = rows.into_iter().filter_map(AuditLogRow::into_entry).collect();

        Ok((items, next_cursor))
    }

    async fn distinct_actors(&self) -> DomainResult<Vec<JournalActor>> {
        let rows = sqlx::query_as::<_, JournalActorRow>(
            r#"
            SELECT a.actor_id AS id, u.display_name AS display_name
            FROM (SELECT DISTINCT actor_id FROM audit_logs WHERE actor_id IS NOT NULL) AS a
            LEFT JOIN users u ON u.id = a.actor_id
            ORDER BY a.actor_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = UserId::new(row.id).ok()?;
                Some(JournalActor {
                    id,
                    label: row
                        .display_name
                        .unwrap_or_else(|| format!("unknown user #{}", row.id)),
                })
            })
            .collect())
    }

    async fn distinct_actions(&self) -> DomainResult<Vec<AuditAction>> {
        let actions: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT action FROM audit_logs ORDER BY action")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx)?;

        // Only filterable tokens are offered.
        Ok(actions
            .into_iter()
            .filter_map(|action| AuditAction::new(action).ok())
            .collect())
    }
}
