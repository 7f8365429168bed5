// src/presentation/http/controllers/sessions.rs
use crate::application::{commands::sessions::OpenSessionCommand, dto::SessionTokenDto};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{Authenticated, ClientContext},
    state::HttpState,
};
use axum::{Extension, Json, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenSessionRequest {
    pub user_id: i64,
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    request_body = OpenSessionRequest,
    responses(
        (status = 201, description = "Session issued and journaled as login.", body = SessionTokenDto),
        (status = 401, description = "Unauthorized, or the account is unknown or inactive.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Missing users:manage.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Sessions"
)]
pub async fn open_session(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ClientContext(context): ClientContext,
    Json(payload): Json<OpenSessionRequest>,
) -> HttpResult<(StatusCode, Json<SessionTokenDto>)> {
    let session = state
        .services
        .session_commands
        .issue_session(
            &actor,
            &context,
            OpenSessionCommand {
                user_id: payload.user_id,
            },
        )
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(session)))
}
