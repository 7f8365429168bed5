// src/presentation/http/extractors.rs
use crate::{
    application::{
        dto::{AuthenticatedUser, RequestContext},
        error::ApplicationError,
    },
    presentation::http::{middleware::request_id::REQUEST_ID_HEADER, state::HttpState},
};
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use std::net::SocketAddr;

use super::error::HttpError;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

/// Resolves the bearer token when one is sent. A request without an
/// `Authorization` header yields `None`; a bad token is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthenticatedUser>);

/// Origin and request id of the current request, for the journal.
#[derive(Debug, Clone)]
pub struct ClientContext(pub RequestContext);

fn app_state(parts: &Parts) -> Result<HttpState, HttpError> {
    parts.extensions.get::<HttpState>().cloned().ok_or_else(|| {
        HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
    })
}

async fn resolve_bearer(parts: &Parts) -> Result<Option<AuthenticatedUser>, HttpError> {
    let state = app_state(parts)?;
    let Some(header) = parts.headers.typed_get::<Authorization<Bearer>>() else {
        return Ok(None);
    };
    let user = state
        .services
        .authenticate(header.token())
        .await
        .map_err(HttpError::from_error)?;
    Ok(Some(user))
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve_bearer(parts).await?.map(Self).ok_or_else(|| {
            HttpError::from_error(ApplicationError::unauthorized(
                "missing Authorization header",
            ))
        })
    }
}

impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_bearer(parts).await?))
    }
}

impl<S> FromRequestParts<S> for ClientContext
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        let origin = client_origin(&parts.headers).or(peer);
        let request_id = header_value(&parts.headers, REQUEST_ID_HEADER);
        Ok(Self(RequestContext::new(origin, request_id)))
    }
}

/// First `X-Forwarded-For` hop, falling back to `X-Real-IP`.
pub fn client_origin(headers: &HeaderMap) -> Option<String> {
    header_value(headers, FORWARDED_FOR)
        .and_then(|value| {
            value
                .split(',')
                .map(str::trim)
                .find(|hop| !hop.is_empty())
                .map(str::to_string)
        })
        .or_else(|| header_value(headers, REAL_IP))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_for_takes_the_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_FOR, HeaderValue::from_static("203.0.113.9, 10.0.0.1"));
        headers.insert(REAL_IP, HeaderValue::from_static("10.0.0.2"));
        assert_eq!(client_origin(&headers).as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn real_ip_is_the_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(REAL_IP, HeaderValue::from_static("198.51.100.4"));
        assert_eq!(client_origin(&headers).as_deref(), Some("198.51.100.4"));
        assert_eq!(client_origin(&HeaderMap::new()), None);
    }
}
