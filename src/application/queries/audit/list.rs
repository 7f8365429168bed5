use std::collections::{BTreeSet, HashMap};

use super::{
    AuditQueryService, common,
    filter::{RawAuditFilter, parse_filter},
};
use crate::{
    application::{
        dto::{
            ActorView, AuditFilterOptions, AuditLogPage, AuditLogView, AuthenticatedUser,
            CursorPage,
        },
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditLog, AuditLogCursor},
        user::{User, UserId},
    },
};
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct ListAuditLogsQuery {
    pub filter: RawAuditFilter,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl AuditQueryService {
    pub async fn list_audit_logs(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<AuditLogPage> {
        common::ensure_audit_reader(actor)?;
        let filter = parse_filter(&query.filter);
        let limit = common::normalize_limit(query.limit);
        let typed_cursor = self.decode_cursor(query.cursor.as_deref())?;

        let (items, next_cursor) = self
            .repo
            .scan(&filter, limit, typed_cursor)
            .await
            .map_err(ApplicationError::from)?;
        let actors = self.resolve_actors(&items).await;
        let page = CursorPage::new(items, next_cursor).map(|log| {
            let view = actor_view(&actors, log.actor.user_id());
            AuditLogView::new(log, view)
        });

        let filters = match self.collect_filter_options().await {
            Ok(options) => options,
            Err(err) => {
                warn!(error = %err, "audit filter options unavailable");
                AuditFilterOptions::default()
            }
        };

        Ok(AuditLogPage {
            items: page.items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
            filters,
        })
    }

    /// Distinct actors and actions that currently occur in the journal.
    pub async fn filter_options(
        &self,
        actor: Option<&AuthenticatedUser>,
    ) -> ApplicationResult<AuditFilterOptions> {
        common::ensure_audit_reader(actor)?;
        self.collect_filter_options().await
    }

    async fn collect_filter_options(&self) -> ApplicationResult<AuditFilterOptions> {
        let actors = self.repo.distinct_actors().await?;
        let actions = self.repo.distinct_actions().await?;
        Ok(AuditFilterOptions::new(actors, actions))
    }

    /// Looks up every actor on the page in one round trip. A failed lookup
    /// degrades to placeholders instead of failing the listing.
    async fn resolve_actors(&self, items: &[AuditLog]) -> HashMap<UserId, User> {
        let ids: Vec<UserId> = items
            .iter()
            .filter_map(|log| log.actor.user_id())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if ids.is_empty() {
            return HashMap::new();
        }

        match self.users.find_by_ids(&ids).await {
            Ok(users) => users.into_iter().map(|user| (user.id, user)).collect(),
            Err(err) => {
                warn!(error = %err, "failed to resolve audit actors");
                HashMap::new()
            }
        }
    }

    fn decode_cursor(&self, cursor: Option<&str>) -> ApplicationResult<Option<AuditLogCursor>> {
        match cursor.map(str::trim).filter(|c| !c.is_empty()) {
            Some(token) => Ok(Some(
                AuditLogCursor::decode(token).map_err(ApplicationError::from)?,
            )),
            None => Ok(None),
        }
    }
}

fn actor_view(actors: &HashMap<UserId, User>, actor_id: Option<UserId>) -> ActorView {
    match actor_id {
        None => ActorView::system(),
        Some(id) => actors
            .get(&id)
            .map_or_else(|| ActorView::unknown(id.into()), ActorView::from_user),
    }
}
