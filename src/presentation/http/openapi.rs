// src/presentation/http/openapi.rs
use axum::{Json, Router, routing::get};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi};
use utoipa_redoc::{Redoc, Servable};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::system::health,
        crate::presentation::http::controllers::audit::list_audit_logs,
        crate::presentation::http::controllers::audit::get_audit_log_detail,
        crate::presentation::http::controllers::audit::get_audit_log_display,
        crate::presentation::http::controllers::sessions::open_session,
        crate::presentation::http::controllers::users::create_user,
        crate::presentation::http::controllers::users::update_user,
        crate::presentation::http::controllers::users::delete_user
    ),
    components(
        schemas(
            crate::presentation::http::controllers::system::StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::sessions::OpenSessionRequest,
            crate::application::dto::SessionTokenDto,
            crate::presentation::http::controllers::users::CreateUserRequest,
            crate::presentation::http::controllers::users::UpdateUserRequest,
            crate::application::dto::UserDto,
            crate::application::dto::ActorKind,
            crate::application::dto::ActorView,
            crate::application::dto::ActorOptionDto,
            crate::application::dto::AuditLogView,
            crate::application::dto::AuditFilterOptions,
            crate::application::dto::AuditLogPage,
            crate::application::dto::AuditDetailDto,
            crate::application::dto::SnapshotDisplayDto,
            crate::application::dto::AuditDetailDisplayDto
        )
    ),
    tags(
        (name = "Audit", description = "Activity journal review"),
        (name = "Sessions", description = "Bearer session issuing, journaled as login"),
        (name = "Users", description = "Account management, journaled"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&BearerAuth),
    info(
        title = "Workshop Core API",
        description = "Activity journal and account management",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("opaque".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    Router::new()
        .route("/openapi.json", get(serve_openapi))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_audit_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/audit-logs",
            "/api/v1/audit-logs/{id}",
            "/api/v1/audit-logs/{id}/display",
            "/api/v1/sessions",
            "/api/v1/users",
            "/api/v1/users/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearerAuth"));
    }
}
