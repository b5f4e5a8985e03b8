//! Request identity extractors backed by `Authorization` header tokens.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use http::request::Parts;
use http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use uuid::Uuid;

use larder_domain::user::UserRole;

use crate::token::validate_access_token;

/// HMAC secret used to validate access tokens. Provide it from the app state via `FromRef`.
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

/// Authenticated caller.
///
/// Accepts `Authorization: Token <jwt>` or `Authorization: Bearer <jwt>`.
/// Returns 401 if the header is absent or the token does not validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Caller that may be anonymous.
///
/// A missing `Authorization` header yields `Viewer(None)`; a present but invalid token is
/// still rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer(pub Option<Identity>);

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.map(|identity| identity.user_id)
    }
}

fn token_from_headers(headers: &HeaderMap) -> Option<Result<&str, StatusCode>> {
    let value = headers.get(AUTHORIZATION)?;
    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Token ").or_else(|| v.strip_prefix("Bearer ")))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(StatusCode::UNAUTHORIZED);
    Some(token)
}

fn identity_from_token(token: &str, secret: &str) -> Result<Identity, StatusCode> {
    let info = validate_access_token(token, secret).map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(Identity {
        user_id: info.user_id,
        role: info.role,
    })
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = match token_from_headers(&parts.headers) {
            Some(token) => token.and_then(|t| identity_from_token(t, &secret.0)),
            None => Err(StatusCode::UNAUTHORIZED),
        };
        async move { result }
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = match token_from_headers(&parts.headers) {
            Some(token) => token
                .and_then(|t| identity_from_token(t, &secret.0))
                .map(|identity| Viewer(Some(identity))),
            None => Ok(Viewer(None)),
        };
        async move { result }
    }
}
