use std::sync::Arc;

use serde_json::{Value, json};

use crate::application::{
    commands::audit::AuditRecorder,
    dto::RequestContext,
    ports::{time::Clock, unit_of_work::UnitOfWorkFactory},
};

pub const USER_ENTITY: &str = "user";

pub struct UserCommandService {
    pub(super) uow: Arc<dyn UnitOfWorkFactory>,
    pub(super) recorder: AuditRecorder,
    pub(super) clock: Arc<dyn Clock>,
}

impl UserCommandService {
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>, recorder: AuditRecorder, clock: Arc<dyn Clock>) -> Self {
        Self {
            uow,
            recorder,
            clock,
        }
    }
}

pub(super) fn audit_meta(context: &RequestContext, changed: &[&str]) -> Value {
    json!({
        "changed": changed,
        "request_id": context.request_id,
    })
}
