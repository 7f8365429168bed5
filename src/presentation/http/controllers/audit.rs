// src/presentation/http/controllers/audit.rs
use crate::application::{
    dto::{AuditDetailDisplayDto, AuditDetailDto, AuditLogPage},
    error::ApplicationError,
    queries::audit::{CANNOT_LOAD_DETAILS, ListAuditLogsQuery, RawAuditFilter},
};
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::MaybeAuthenticated,
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{Path, RawQuery},
};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// Query string accepted by the journal listing. Every field is optional and
/// values that do not parse are ignored rather than rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuditLogListParams {
    /// Numeric id of the acting user.
    pub actor_id: Option<String>,
    /// Action token, e.g. `update`.
    pub action: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD` (UTC).
    pub date_from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD` (UTC).
    pub date_to: Option<String>,
    /// Page size; defaults to 20, capped at 100.
    pub limit: Option<String>,
    /// Opaque cursor from a previous page.
    pub cursor: Option<String>,
}

impl AuditLogListParams {
    fn from_query(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(raw) {
            Ok(pairs) => pairs,
            Err(err) => {
                debug!(error = %err, "ignoring unparseable audit query string");
                return Self::default();
            }
        };

        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "actor_id" => &mut params.actor_id,
                "action" => &mut params.action,
                "date_from" => &mut params.date_from,
                "date_to" => &mut params.date_to,
                "limit" => &mut params.limit,
                "cursor" => &mut params.cursor,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    fn into_query(self) -> ListAuditLogsQuery {
        let limit = self
            .limit
            .as_deref()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or_default();
        ListAuditLogsQuery {
            filter: RawAuditFilter {
                actor_id: self.actor_id,
                action: self.action,
                date_from: self.date_from,
                date_to: self.date_to,
            },
            limit,
            cursor: self.cursor,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs",
    params(AuditLogListParams),
    responses(
        (status = 200, description = "Journal entries, newest first.", body = AuditLogPage),
        (status = 400, description = "Malformed cursor.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Not signed in.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Missing audit:read.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(actor): MaybeAuthenticated,
    RawQuery(raw): RawQuery,
) -> HttpResult<Json<AuditLogPage>> {
    let query = AuditLogListParams::from_query(raw.as_deref()).into_query();
    let page = state
        .services
        .audit_queries
        .list_audit_logs(actor.as_ref(), query)
        .await
        .into_http()?;
    Ok(Json(page))
}

/// Detail lookups answer with one generic message whether the entry is
/// missing or the caller may not see it.
fn detail_error(err: ApplicationError) -> HttpError {
    if err.is_not_found() || err.is_access_denied() {
        let status = HttpError::from_error(err).status();
        HttpError::new(status, CANNOT_LOAD_DETAILS)
    } else {
        HttpError::from_error(err)
    }
}

fn parse_entry_id(raw: &str) -> HttpResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| detail_error(ApplicationError::not_found("audit entry not found")))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/{id}",
    params(("id" = String, Path, description = "Journal entry id")),
    responses(
        (status = 200, description = "Raw snapshot text of one entry.", body = AuditDetailDto),
        (status = 401, description = "Not signed in.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such entry.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Audit"
)]
pub async fn get_audit_log_detail(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(actor): MaybeAuthenticated,
    Path(id): Path<String>,
) -> HttpResult<Json<AuditDetailDto>> {
    let id = parse_entry_id(&id)?;
    let detail = state
        .services
        .audit_queries
        .audit_log_detail(actor.as_ref(), id)
        .await
        .map_err(detail_error)?;
    Ok(Json(detail))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/{id}/display",
    params(("id" = String, Path, description = "Journal entry id")),
    responses(
        (status = 200, description = "Snapshots rendered for display.", body = AuditDetailDisplayDto),
        (status = 401, description = "Not signed in.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such entry.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Audit"
)]
pub async fn get_audit_log_display(
    Extension(state): Extension<HttpState>,
    MaybeAuthenticated(actor): MaybeAuthenticated,
    Path(id): Path<String>,
) -> HttpResult<Json<AuditDetailDisplayDto>> {
    let id = parse_entry_id(&id)?;
    let display = state
        .services
        .audit_queries
        .audit_log_display(actor.as_ref(), id)
        .await
        .map_err(detail_error)?;
    Ok(Json(display))
}
