// src/presentation/http/routes.rs
use crate::presentation::http::{
    controllers::{audit, sessions, system, users},
    middleware::request_id::ensure_request_id,
    openapi,
    state::HttpState,
};
use axum::{
    Extension, Router,
    http::Method,
    middleware,
    routing::{get, patch, post},
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: HttpState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(system::health))
        .route("/api/v1/audit-logs", get(audit::list_audit_logs))
        .route("/api/v1/audit-logs/{id}", get(audit::get_audit_log_detail))
        .route(
            "/api/v1/audit-logs/{id}/display",
            get(audit::get_audit_log_display),
        )
        .route("/api/v1/sessions", post(sessions::open_session))
        .route("/api/v1/users", post(users::create_user))
        .route(
            "/api/v1/users/{id}",
            patch(users::update_user).delete(users::delete_user),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(ensure_request_id))
        .layer(cors)
        .layer(Extension(state))
}
