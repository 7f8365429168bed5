// src/presentation/http/controllers/users.rs
use crate::application::{
    commands::users::{CreateUserCommand, DeleteUserCommand, UpdateUserCommand},
    dto::UserDto,
};
use crate::presentation::http::{
    error::{HttpResult, IntoHttpResult},
    extractors::{Authenticated, ClientContext},
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// `admin` or `staff` (default).
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created and journaled.", body = UserDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Missing users:manage.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Username taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ClientContext(context): ClientContext,
    Json(payload): Json<CreateUserRequest>,
) -> HttpResult<(StatusCode, Json<UserDto>)> {
    let command = CreateUserCommand {
        username: payload.username,
        display_name: payload.display_name,
        email: payload.email,
        role: payload.role,
    };
    let user = state
        .services
        .user_commands
        .create_user(&actor, &context, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated and journaled.", body = UserDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No such user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> HttpResult<Json<UserDto>> {
    let command = UpdateUserCommand {
        user_id: id,
        display_name: payload.display_name,
        email: payload.email,
        role: payload.role,
        is_active: payload.is_active,
    };
    let user = state
        .services
        .user_commands
        .update_user(&actor, &context, command)
        .await
        .into_http()?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "Account deleted and journaled."),
        (status = 404, description = "No such user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ClientContext(context): ClientContext,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .user_commands
        .delete_user(&actor, &context, DeleteUserCommand { user_id: id })
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
