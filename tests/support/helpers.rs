// tests/support/helpers.rs
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header::AUTHORIZATION};
use axum::response::Response;
use chrono::Duration;
use serde_json::Value;
use sqlx::SqlitePool;

use workshop_core::application::{
    commands::{
        sessions::OpenSessionCommand,
        users::InstallAdminCommand,
    },
    dto::{RequestContext, UserDto},
    ports::{ClockPort, SessionAuthenticatorPort, SessionTokensPort, UnitOfWorkFactoryPort},
    services::ApplicationServices,
};
use workshop_core::infrastructure::{
    database,
    repositories::{SqliteAuditLogRepository, SqliteUnitOfWorkFactory, SqliteUserRepository},
    security::{session_store::SqliteSessionStore, session_token::Sha256SessionTokens},
    time::SystemClock,
};
use workshop_core::presentation::http::{routes::build_router, state::HttpState};

/// インメモリ SQLite 上に組み立てた本番と同じ構成
pub struct SqliteStack {
    pub pool: SqlitePool,
    pub services: Arc<ApplicationServices>,
}

impl SqliteStack {
    pub async fn new() -> Self {
        let pool = database::init_in_memory_pool()
            .await
            .expect("in-memory sqlite pool");

        let clock: Arc<ClockPort> = Arc::new(SystemClock);
        let tokens: Arc<SessionTokensPort> = Arc::new(Sha256SessionTokens);
        let uow: Arc<UnitOfWorkFactoryPort> = Arc::new(SqliteUnitOfWorkFactory::new(pool.clone()));
        let authenticator: Arc<SessionAuthenticatorPort> = Arc::new(SqliteSessionStore::new(
            pool.clone(),
            Arc::clone(&tokens),
            Arc::clone(&clock),
        ));

        let services = Arc::new(ApplicationServices::new(
            uow,
            Arc::new(SqliteAuditLogRepository::new(pool.clone())),
            Arc::new(SqliteUserRepository::new(pool.clone())),
            authenticator,
            tokens,
            clock,
            Duration::hours(8),
        ));

        Self { pool, services }
    }

    pub fn router(&self) -> axum::Router {
        build_router(HttpState::new(Arc::clone(&self.services)))
    }

    /// インストーラで管理者を作成し、そのセッショントークンを返す
    pub async fn install_admin(&self) -> (UserDto, String) {
        let admin = self
            .services
            .user_commands
            .install_admin(InstallAdminCommand {
                username: "owner".into(),
                email: Some("owner@example.com".into()),
            })
            .await
            .expect("install admin")
            .expect("fresh database has no accounts");
        let token = self.login(admin.id).await;
        (admin, token)
    }

    pub async fn login(&self, user_id: i64) -> String {
        self.services
            .session_commands
            .open_session(
                &RequestContext::new(Some("192.0.2.10".into()), Some("req-login".into())),
                OpenSessionCommand { user_id },
            )
            .await
            .expect("open session")
            .token
    }

    pub async fn audit_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(&self.pool)
            .await
            .expect("count audit rows")
    }
}

pub fn ctx() -> RequestContext {
    RequestContext::new(Some("203.0.113.7".into()), Some("req-test".into()))
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: Method, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header("content-type", "application/json")
        .header("x-forwarded-for", "198.51.100.23, 10.0.0.1")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// ErrorResponse 形式の JSON であることを検証し、message を返す
pub async fn assert_error_response(
    resp: Response,
    expected_status: StatusCode,
    expected_error: &str,
) -> String {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = body_json(resp).await;
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
    msg_field.to_string()
}
