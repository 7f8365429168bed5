//! Lenient parsing of journal filter input.
//!
//! Filters are advisory: a field that does not parse is dropped and the scan
//! proceeds without that constraint.

use crate::domain::{
    audit::{AuditAction, AuditLogFilter},
    user::UserId,
};
use chrono::NaiveDate;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter fields exactly as received from a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAuditFilter {
    pub actor_id: Option<String>,
    pub action: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

pub fn parse_filter(raw: &RawAuditFilter) -> AuditLogFilter {
    AuditLogFilter {
        actor_id: non_blank(raw.actor_id.as_deref()).and_then(|value| {
            let parsed = value.parse::<i64>().ok().and_then(|id| UserId::new(id).ok());
            if parsed.is_none() {
                debug!(actor_id = value, "ignoring malformed actor filter");
            }
            parsed
        }),
        action: non_blank(raw.action.as_deref()).and_then(|value| {
            let parsed = AuditAction::new(value).ok();
            if parsed.is_none() {
                debug!(action = value, "ignoring malformed action filter");
            }
            parsed
        }),
        date_from: parse_date("date_from", raw.date_from.as_deref()),
        date_to: parse_date("date_to", raw.date_to.as_deref()),
    }
}

fn parse_date(field: &'static str, value: Option<&str>) -> Option<NaiveDate> {
    let value = non_blank(value)?;
    let parsed = NaiveDate::parse_from_str(value, DATE_FORMAT).ok();
    if parsed.is_none() {
        debug!(field, value, "ignoring malformed date filter");
    }
    parsed
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
